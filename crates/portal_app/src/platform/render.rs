//! Plain-text rendering of the view model.

use std::fmt::{self, Write};

use portal_core::{AppViewModel, CardView, ListView, NoticeLevel, Screen};

pub fn render(view: &AppViewModel) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_view(&mut out, view)?;
    Ok(out)
}

fn write_view(out: &mut String, view: &AppViewModel) -> fmt::Result {
    for notice in &view.notices {
        let marker = match notice.level {
            NoticeLevel::Success => "ok",
            NoticeLevel::Info => "--",
            NoticeLevel::Error => "!!",
        };
        writeln!(out, "{marker} {}", notice.text)?;
    }
    if view.retry_available {
        out.push_str("   (type `retry` to try the last action again)\n");
    }

    match &view.list {
        Some(list) => write_list(out, list)?,
        None if view.screen == Screen::Entry => {
            out.push_str("Not signed in. Use `portal login` or `portal register`.\n");
        }
        None => {}
    }
    if view.pending_mutations > 0 {
        writeln!(out, "({} action(s) still in flight)", view.pending_mutations)?;
    }
    Ok(())
}

fn write_list(out: &mut String, list: &ListView) -> fmt::Result {
    writeln!(out, "== {} ==", list.heading)?;
    if !list.tabs.is_empty() {
        let tabs: Vec<String> = list
            .tabs
            .iter()
            .map(|tab| {
                if tab.active {
                    format!("[{}]", tab.label)
                } else {
                    tab.label.clone()
                }
            })
            .collect();
        writeln!(out, "{}", tabs.join("  "))?;
    }
    if let Some(error) = &list.error {
        writeln!(out, "!! {error} (showing previous results; `refresh` to retry)")?;
    }
    if list.loading {
        out.push_str("Loading...\n");
    }

    if list.cards.is_empty() {
        writeln!(out, "{}", list.empty_message)?;
    }
    for card in &list.cards {
        write_card(out, card)?;
    }

    if list.show_pager() {
        let mut pager = format!("Page {} of {}", list.page + 1, list.total_pages);
        if list.has_previous {
            pager.push_str("  < prev");
        }
        if list.has_next {
            pager.push_str("  next >");
        }
        writeln!(out, "{pager}")?;
    }
    Ok(())
}

fn write_card(out: &mut String, card: &CardView) -> fmt::Result {
    writeln!(out, "#{} {}", card.id, card.title)?;
    if !card.subtitle.is_empty() {
        writeln!(out, "   {}", card.subtitle)?;
    }
    if !card.details.is_empty() {
        writeln!(out, "   {}", card.details.join(" | "))?;
    }
    if !card.badges.is_empty() {
        let badges: Vec<String> = card.badges.iter().map(|b| format!("[{b}]")).collect();
        writeln!(out, "   {}", badges.join(" "))?;
    }
    if let Some(action) = &card.action {
        writeln!(out, "   > {action}")?;
    }
    Ok(())
}
