//! Effects - side effects declared by the reducer

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch one roster page at the default page size
    LoadPage { page: u32 },
    /// Fetch the name-filtered roster at the enlarged page size
    LoadFiltered { name: String },
    /// Schedule (or reschedule) the debounced suggestion lookup
    FetchSuggestions { query: String },
    /// Drop any pending suggestion lookup without a network call
    CancelSuggestions,
    LoadDetailById { id: u32 },
    LoadDetailByName { name: String },
    LoadSprite { url: String },
}
