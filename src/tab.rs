/// Browser tab identity as seen by the background and panel contexts
use serde::{Deserialize, Serialize};

/// Chrome tab id, stable for the lifetime of the tab
pub type TabId = i32;

/// A tab at one moment in time. Never hold on to one across an `.await`:
/// the url and the active tab both move underneath us.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabContext {
    pub id: TabId,
    #[serde(default)]
    pub url: Option<String>,
}

impl TabContext {
    pub fn new(id: TabId, url: Option<String>) -> TabContext {
        TabContext { id, url }
    }
}
