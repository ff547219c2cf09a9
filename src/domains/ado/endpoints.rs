//! Azure DevOps REST endpoints, relative to `<organization>/<project>`.

/// Run a WIQL query.
pub const WIQL: &str = "_apis/wit/wiql";

/// Single work item; the id is appended as a path segment.
pub const WORK_ITEMS: &str = "_apis/wit/workitems";

/// Fetch several work items in one call.
pub const WORK_ITEMS_BATCH: &str = "_apis/wit/workitemsbatch";

/// Path of a single work item.
pub fn work_item(id: u32) -> String {
    format!("{WORK_ITEMS}/{id}")
}
