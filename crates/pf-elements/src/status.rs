//! Link operating status.

use core::fmt;
use core::str::FromStr;

use crate::error::ElementError;

/// Operating status of a link.
///
/// Any collaborator may move a link to any status; the link only reacts to the
/// value it currently holds. Discriminants match the integer codes used by
/// controls and report files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum LinkStatus {
    Closed = 0,
    Open = 1,
    Active = 2,
    TempClosed = 3,
}

impl LinkStatus {
    pub const ALL: [LinkStatus; 4] = [
        LinkStatus::Closed,
        LinkStatus::Open,
        LinkStatus::Active,
        LinkStatus::TempClosed,
    ];

    /// Upper-case label used in status reports.
    pub const fn label(self) -> &'static str {
        match self {
            LinkStatus::Closed => "CLOSED",
            LinkStatus::Open => "OPEN",
            LinkStatus::Active => "ACTIVE",
            LinkStatus::TempClosed => "TEMP_CLOSED",
        }
    }

    pub const fn code(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for LinkStatus {
    type Error = ElementError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(LinkStatus::Closed),
            1 => Ok(LinkStatus::Open),
            2 => Ok(LinkStatus::Active),
            3 => Ok(LinkStatus::TempClosed),
            _ => Err(ElementError::UnknownStatus { code }),
        }
    }
}

impl FromStr for LinkStatus {
    type Err = ElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CLOSED" => Ok(LinkStatus::Closed),
            "OPEN" => Ok(LinkStatus::Open),
            "ACTIVE" => Ok(LinkStatus::Active),
            "TEMP_CLOSED" => Ok(LinkStatus::TempClosed),
            _ => Err(ElementError::UnknownStatusLabel {
                label: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
