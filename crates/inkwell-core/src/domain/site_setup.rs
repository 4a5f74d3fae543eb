use serde::{Deserialize, Serialize};

/// Site-wide presentation settings.
///
/// Several rows may exist; the active one is the row with the highest id
/// (see [`crate::ports::SiteSetupRepository::find_active`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSetup {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub show_header: bool,
    pub show_search: bool,
    pub show_menu: bool,
    pub show_description: bool,
    pub show_pagination: bool,
    pub show_footer: bool,
    /// Stored reference to the favicon image, empty when unset.
    pub favicon: String,
    pub menu: Vec<MenuLink>,
}

impl SiteSetup {
    /// A new unsaved setup with every section shown.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: 0,
            title: title.into(),
            description: description.into(),
            show_header: true,
            show_search: true,
            show_menu: true,
            show_description: true,
            show_pagination: true,
            show_footer: true,
            favicon: String::new(),
            menu: Vec::new(),
        }
    }
}

/// Navigation entry attached to a site setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuLink {
    pub id: i64,
    pub text: String,
    pub url_or_path: String,
    pub new_tab: bool,
}
