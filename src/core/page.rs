//! # Pages
//!
//! The closed set of navigable sections. Element ids, nav labels and
//! keyboard shortcuts all hang off this enum.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum PageId {
    #[default]
    Home,
    About,
    WhatWeDo,
    Contact,
}

impl PageId {
    /// Every page, in navigation order.
    pub const ALL: [PageId; 4] = [PageId::Home, PageId::About, PageId::WhatWeDo, PageId::Contact];

    /// The element id of the page container.
    pub fn as_str(self) -> &'static str {
        match self {
            PageId::Home => "home",
            PageId::About => "about",
            PageId::WhatWeDo => "what-we-do",
            PageId::Contact => "contact",
        }
    }

    /// Text of the nav link that points at this page.
    pub fn label(self) -> &'static str {
        match self {
            PageId::Home => "Home",
            PageId::About => "About Us",
            PageId::WhatWeDo => "What We Do",
            PageId::Contact => "Contact",
        }
    }

    /// Digit used with Ctrl/Cmd to jump to this page.
    pub fn shortcut(self) -> char {
        match self {
            PageId::Home => '1',
            PageId::About => '2',
            PageId::WhatWeDo => '3',
            PageId::Contact => '4',
        }
    }

    pub fn from_shortcut(key: char) -> Option<PageId> {
        PageId::ALL.into_iter().find(|page| page.shortcut() == key)
    }

    fn index(self) -> usize {
        PageId::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }

    /// Next page in navigation order, wrapping around.
    pub fn next(self) -> PageId {
        PageId::ALL[(self.index() + 1) % PageId::ALL.len()]
    }

    /// Previous page in navigation order, wrapping around.
    pub fn prev(self) -> PageId {
        let len = PageId::ALL.len();
        PageId::ALL[(self.index() + len - 1) % len]
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name one of the known pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPage(pub String);

impl fmt::Display for UnknownPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown page: {}", self.0)
    }
}

impl std::error::Error for UnknownPage {}

impl FromStr for PageId {
    type Err = UnknownPage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PageId::ALL
            .into_iter()
            .find(|page| page.as_str() == s)
            .ok_or_else(|| UnknownPage(s.to_string()))
    }
}
