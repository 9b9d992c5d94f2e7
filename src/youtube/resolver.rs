use crate::youtube::api::ChannelLookup;
use crate::youtube::url::{self, ChannelRef};

/// Resolve channel input (URL, handle, or free text) to a canonical `UC…` ID.
///
/// Strategies run in a fixed order and short-circuit on the first non-empty
/// result; a strategy that errors or returns no items is skipped. When the
/// chain is exhausted (or no channel pattern matched at all), a final
/// fallback resolves the entire original input as a free-text channel search.
/// `None` means unresolved; lookup failures never escape past this function.
pub async fn resolve_channel<L: ChannelLookup + ?Sized>(lookup: &L, input: &str) -> Option<String> {
    let input = input.trim();

    match url::channel_ref(input) {
        ChannelRef::Id(id) if url::is_canonical_channel_id(&id) => return Some(id),
        ChannelRef::Id(id) => {
            tracing::debug!("extracted channel id {} is not canonical, falling back", id);
        }
        ChannelRef::Custom(name) | ChannelRef::Handle(name) => {
            if let Some(id) = try_channel_search(lookup, &name).await {
                return Some(id);
            }
        }
        ChannelRef::Username(name) => match lookup.channel_id_for_username(&name).await {
            Ok(Some(id)) => return Some(id),
            Ok(None) => tracing::debug!("no channel found for username {}", name),
            Err(err) => tracing::debug!("username lookup failed for {}: {}", name, err),
        },
        // Direct-ID input without any URL decoration
        ChannelRef::Unmatched(raw) if url::is_canonical_channel_id(&raw) => return Some(raw),
        ChannelRef::Unmatched(_) => {}
    }

    try_channel_search(lookup, input).await
}

async fn try_channel_search<L: ChannelLookup + ?Sized>(lookup: &L, query: &str) -> Option<String> {
    match lookup.search_channel_id(query).await {
        Ok(Some(id)) => Some(id),
        Ok(None) => {
            tracing::debug!("channel search for {:?} returned no items", query);
            None
        }
        Err(err) => {
            tracing::debug!("channel search for {:?} failed: {}", query, err);
            None
        }
    }
}
