use crate::paging::clamp_page;
use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => state.sync_remote(),
        Msg::PageRequested(requested) => state.set_page(clamp_page(requested)),
        Msg::NextPage => {
            if state.has_next_page() && !state.loading() {
                let next = state.view_state().page.saturating_add(1);
                state.set_page(next)
            } else {
                Vec::new()
            }
        }
        Msg::PrevPage => {
            let page = state.view_state().page;
            if page > 1 {
                state.set_page(page - 1)
            } else {
                Vec::new()
            }
        }
        Msg::ModeToggled => state.toggle_mode(),
        Msg::LanguageFilterChanged(language) => state.set_language_filter(&language),
        Msg::StarToggled(id) => state.toggle_star(id),
        Msg::RemoteLoaded { request, result } => {
            state.apply_remote(request, result);
            Vec::new()
        }
    };

    (state, effects)
}
