//! Arena-backed construction of links.
//!
//! The factory never owns storage. It asks the arena for a slot and builds
//! the link in it; the arena owns every link until it is dropped.

use pf_core::numeric::ensure_positive;
use pf_core::{Arena, LinkId, NodeId};
use tracing::{debug, warn};

use crate::error::{ElementError, ElementResult};
use crate::link::{Link, LinkType};
use crate::pipe::Pipe;
use crate::pump::Pump;
use crate::status::LinkStatus;
use crate::valve::Valve;

/// Pool holding every link of a network.
pub type LinkArena = Arena<Link>;

/// Link variant discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum LinkKind {
    Pipe = 0,
    Pump = 1,
    Valve = 2,
}

impl LinkKind {
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Default-configured variant data for this kind.
    fn default_type(self) -> LinkType {
        match self {
            LinkKind::Pipe => LinkType::Pipe(Pipe::default()),
            LinkKind::Pump => LinkType::Pump(Pump::default()),
            LinkKind::Valve => LinkType::Valve(Valve::default()),
        }
    }
}

impl TryFrom<i32> for LinkKind {
    type Error = ElementError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(LinkKind::Pipe),
            1 => Ok(LinkKind::Pump),
            2 => Ok(LinkKind::Valve),
            _ => Err(ElementError::UnknownKind { code }),
        }
    }
}

impl LinkType {
    pub fn kind(&self) -> LinkKind {
        match self {
            LinkType::Pipe(_) => LinkKind::Pipe,
            LinkType::Pump(_) => LinkKind::Pump,
            LinkType::Valve(_) => LinkKind::Valve,
        }
    }
}

impl Link {
    /// Build a link from an integer type code.
    ///
    /// Unknown codes yield `None` and leave the arena untouched. A caller
    /// building a network should treat `None` as a fatal configuration error.
    pub fn factory(code: i32, name: impl Into<String>, arena: &mut LinkArena) -> Option<LinkId> {
        let kind = match LinkKind::try_from(code) {
            Ok(kind) => kind,
            Err(err) => {
                warn!(%err, "link not created");
                return None;
            }
        };
        match Self::create(kind, name, arena) {
            Ok(id) => Some(id),
            Err(err) => {
                warn!(%err, "link not created");
                None
            }
        }
    }

    /// Build a default-configured link of `kind` inside `arena`.
    pub fn create(
        kind: LinkKind,
        name: impl Into<String>,
        arena: &mut LinkArena,
    ) -> ElementResult<LinkId> {
        Self::create_with(kind.default_type(), name, arena)
    }

    /// Build a link from fully configured variant data.
    pub fn create_with(
        link_type: LinkType,
        name: impl Into<String>,
        arena: &mut LinkArena,
    ) -> ElementResult<LinkId> {
        let name = name.into();
        let kind = link_type.kind();
        let id = arena.alloc_with(|id| Link::new(id, name, link_type))?;
        debug!(?kind, id = %id, "link created");
        Ok(id)
    }
}

/// Build-time configuration for a link already placed in an arena.
///
/// ```
/// use pf_core::{Arena, NodeId};
/// use pf_elements::{LinkBuilder, LinkKind, LinkStatus};
///
/// let mut arena = Arena::new();
/// let id = LinkBuilder::new(LinkKind::Valve, "V1")
///     .nodes(NodeId::from_index(0), NodeId::from_index(1))
///     .section(0.5, 0.2)
///     .initial_status(LinkStatus::Active)
///     .initial_setting(10.0)
///     .build(&mut arena)
///     .unwrap();
/// assert_eq!(arena.get(id).unwrap().type_label(), "Valve");
/// ```
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    name: String,
    link_type: LinkType,
    nodes: Option<(NodeId, NodeId)>,
    section: Option<(f64, f64)>,
    init_status: Option<LinkStatus>,
    init_setting: Option<f64>,
    rpt_flag: bool,
}

impl LinkBuilder {
    pub fn new(kind: LinkKind, name: impl Into<String>) -> Self {
        Self::from_type(kind.default_type(), name)
    }

    pub fn from_type(link_type: LinkType, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            link_type,
            nodes: None,
            section: None,
            init_status: None,
            init_setting: None,
            rpt_flag: false,
        }
    }

    pub fn nodes(mut self, from: NodeId, to: NodeId) -> Self {
        self.nodes = Some((from, to));
        self
    }

    /// Diameter (ft) and minor-loss K factor.
    pub fn section(mut self, diameter: f64, loss_coeff: f64) -> Self {
        self.section = Some((diameter, loss_coeff));
        self
    }

    pub fn initial_status(mut self, status: LinkStatus) -> Self {
        self.init_status = Some(status);
        self
    }

    pub fn initial_setting(mut self, setting: f64) -> Self {
        self.init_setting = Some(setting);
        self
    }

    pub fn report(mut self, rpt_flag: bool) -> Self {
        self.rpt_flag = rpt_flag;
        self
    }

    /// Validate and place the link in `arena`.
    ///
    /// # Errors
    /// Returns error if the section is non-physical or the arena is full.
    pub fn build(self, arena: &mut LinkArena) -> ElementResult<LinkId> {
        if let Some((diameter, loss_coeff)) = self.section {
            ensure_positive(diameter, "diameter must be positive")?;
            if !(loss_coeff >= 0.0) || !loss_coeff.is_finite() {
                return Err(ElementError::InvalidArg {
                    what: "loss coefficient cannot be negative",
                });
            }
        }

        let id = Link::create_with(self.link_type, self.name, arena)?;
        let link = arena.get_mut(id).ok_or(ElementError::Arena {
            message: format!("link {id} vanished after allocation"),
        })?;
        if let Some((from, to)) = self.nodes {
            link.set_nodes(from, to);
        }
        if let Some((diameter, loss_coeff)) = self.section {
            link.set_section(diameter, loss_coeff);
        }
        if let Some(status) = self.init_status {
            link.set_init_status(status);
        }
        if let Some(setting) = self.init_setting {
            link.set_init_setting(setting);
        }
        link.rpt_flag = self.rpt_flag;
        Ok(id)
    }
}
