//! Texts and keyboards for every conversation screen.

use super::callback::{Callback, CallbackAction};
use super::render::Screen;
use super::state::selectable_count;
use crate::domain::{CatalogEntry, CatalogKind};
use crate::ports::{Button, Keyboard};
use crate::utils::{MAX_CAPTION_LEN, MAX_MESSAGE_LEN, ellipsize, escape_html};

/// Reply to `/help`.
pub const HELP_TEXT: &str = "Use /start to begin searching for movies or series.\n\
I will ask you for the title, show you the results, and you can choose one \
to add to Radarr or Sonarr.\n\n\
/downloads shows the current torrent transfers.\n\
/vpnstatus checks where the VPN connection exits.\n\
/cancel ends the current search.";

/// Reply to a denied user.
pub const UNAUTHORIZED_TEXT: &str = "Sorry, you are not authorized.";

/// Shown before restarting after unexpected input or a stale button.
pub const RECOVERY_TEXT: &str =
    "Something went wrong or I received unexpected input. Let's start over.";

/// Shown before restarting after an unknown command.
pub const UNKNOWN_COMMAND_TEXT: &str =
    "Sorry, I didn't understand that command. Let's start over.";

/// Reply to `/cancel`.
pub const CANCELLED_TEXT: &str = "Operation cancelled. Send /start to search again.";

/// Reply to text when no conversation is running.
pub const NO_SESSION_HINT: &str = "Send /start to search for a movie or series.";

/// Shown when a search comes back empty.
pub const NO_RESULTS_TEXT: &str = "Sorry, I couldn't find anything matching that title.";

/// Longest button label we render.
const MAX_LABEL_LEN: usize = 60;

/// Which wording the kind prompt uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KindPrompt {
    /// First prompt after `/start`, addressed to the user (HTML mention).
    Greeting(String),
    /// After a cancel or a recovery notice.
    Restart,
    /// After an add attempt.
    Next,
}

fn button(label: &str, generation: u64, action: CallbackAction) -> Button {
    Button::new(label, Callback::new(generation, action).to_string())
}

fn cancel_button(generation: u64) -> Button {
    button("❌ Cancel", generation, CallbackAction::Cancel)
}

/// S0: ask for movie or series.
pub fn kind_prompt(generation: u64, prompt: &KindPrompt) -> Screen {
    let text = match prompt {
        KindPrompt::Greeting(mention) => {
            format!("Hi {mention}! What would you like to search for?")
        }
        KindPrompt::Restart => "What would you like to search for?".to_string(),
        KindPrompt::Next => "What would you like to search for next?".to_string(),
    };
    let keyboard = Keyboard::new()
        .row(vec![
            button("🎬 Movie", generation, CallbackAction::Kind(CatalogKind::Movie)),
            button("📺 Series", generation, CallbackAction::Kind(CatalogKind::Series)),
        ])
        .single(cancel_button(generation));
    Screen::text(text).with_keyboard(keyboard)
}

/// S1: ask for a title.
pub fn query_prompt(generation: u64, kind: CatalogKind) -> Screen {
    Screen::text(format!(
        "Okay, searching for a {kind}. Please enter the title:"
    ))
    .with_keyboard(Keyboard::new().single(cancel_button(generation)))
}

/// S1 again after a blank message.
pub fn empty_query_prompt(generation: u64, kind: CatalogKind) -> Screen {
    Screen::text(format!("Please enter the {kind} title to search for:"))
        .with_keyboard(Keyboard::new().single(cancel_button(generation)))
}

/// Sent while the search runs.
pub fn searching_notice(service: &str, kind: CatalogKind, query: &str) -> Screen {
    Screen::text(format!(
        "🔍 Searching {service} for {kind}: '{}'...",
        escape_html(query)
    ))
}

/// The backend could not be reached.
pub fn unavailable_notice(service: &str) -> Screen {
    Screen::text(format!(
        "⚠️ Sorry, I couldn't reach {service} right now. Please try again in a moment."
    ))
}

/// S2: one button per selectable result plus Cancel.
pub fn results_screen(generation: u64, results: &[CatalogEntry]) -> Screen {
    let shown = selectable_count(results.len());
    let text = if shown < results.len() {
        format!(
            "Here's what I found (showing the first {shown} of {}):",
            results.len()
        )
    } else {
        "Here's what I found:".to_string()
    };

    let keyboard = results
        .iter()
        .take(shown)
        .enumerate()
        .fold(Keyboard::new(), |keyboard, (index, entry)| {
            keyboard.single(button(
                &ellipsize(&entry.label(), MAX_LABEL_LEN),
                generation,
                CallbackAction::Pick(index),
            ))
        })
        .single(cancel_button(generation));

    Screen::text(text).with_keyboard(keyboard)
}

/// S3: poster (when known), title, overview and the three choices.
pub fn detail_screen(generation: u64, entry: &CatalogEntry) -> Screen {
    let label = entry.label();
    let limit = if entry.poster_url.is_some() {
        MAX_CAPTION_LEN
    } else {
        MAX_MESSAGE_LEN
    };
    let overview = entry
        .overview
        .as_deref()
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .unwrap_or("No description available.");
    let budget = limit.saturating_sub(label.chars().count() + 2);

    let text = format!(
        "<b>{}</b>\n\n{}",
        escape_html(&label),
        escape_html(&ellipsize(overview, budget))
    );
    let keyboard = Keyboard::new()
        .single(button("✅ Add this", generation, CallbackAction::Confirm))
        .single(button(
            "⬅️ Back to search results",
            generation,
            CallbackAction::BackToResults,
        ))
        .single(button(
            "❌ Cancel search",
            generation,
            CallbackAction::CancelSearch,
        ));

    Screen::text(text)
        .with_keyboard(keyboard)
        .with_photo(entry.poster_url.clone())
}

/// Interim status while the add call runs.
pub fn adding_notice(service: &str, entry: &CatalogEntry) -> Screen {
    Screen::text(format!(
        "⏳ Adding '{}' to {service}...",
        escape_html(&entry.title)
    ))
}

/// Outcome of the add call.
pub fn add_outcome(entry: &CatalogEntry, success: bool) -> Screen {
    let title = escape_html(&entry.title);
    if success {
        Screen::text(format!("✅ Successfully added '{title}' and started search."))
    } else {
        Screen::text(format!(
            "❌ Failed to add '{title}'. Check logs for details."
        ))
    }
}
