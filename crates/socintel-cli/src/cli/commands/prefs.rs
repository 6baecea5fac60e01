//! `socintel prefs ...` – the settings surface.

use anyhow::{bail, Result};
use socintel_core::config::SocintelConfig;
use socintel_core::menu::ContextMenu;
use socintel_core::prefs::{PreferenceDocument, PreferenceStore, SectionKey};
use socintel_core::settings::SettingsPanel;
use socintel_core::ui::{section_options, visible_set, TabSelector};
use std::sync::Arc;

use crate::cli::{PrefsCommand, SectionOption, UrlCommand};

/// Settings tabs in display order.
const TAB_ORDER: [SectionKey; 3] = [SectionKey::Ip, SectionKey::Url, SectionKey::Hash];

pub async fn run_prefs(
    store: PreferenceStore,
    cfg: &SocintelConfig,
    command: PrefsCommand,
) -> Result<()> {
    let store = Arc::new(store);
    let area = store.area();

    let mut menu = ContextMenu::new();
    menu.sync_from_storage(&store.get_all().await.unwrap_or_default());
    let mut changes = store.subscribe();

    let panel = SettingsPanel::open(Arc::clone(&store), cfg.debounce()).await;

    match command {
        PrefsCommand::Show { tab } => {
            print_sections(&panel.prefs(), tab);
            return Ok(());
        }
        PrefsCommand::Reset => {
            store.save_document(&PreferenceDocument::default()).await;
            println!("Preferences reset to defaults.");
        }
        PrefsCommand::Set {
            section,
            option,
            value,
        } => match option {
            SectionOption::Active => panel.set_active(section, value).await,
            SectionOption::Copy => panel.set_copy_to_clipboard(section, value).await,
            SectionOption::Sanitise => panel.set_sanitise(section, value).await?,
        },
        PrefsCommand::Url { command } => match command {
            UrlCommand::List { section } => {
                for (i, input) in panel.url_inputs(section).iter().enumerate() {
                    println!("{i:>2}. {}", input.value);
                }
                return Ok(());
            }
            UrlCommand::Add { section, template } => {
                let index = panel.add_url_input(section);
                edit(&panel, section, index, &template).await?;
            }
            UrlCommand::Set {
                section,
                index,
                template,
            } => edit(&panel, section, index, &template).await?,
            UrlCommand::Remove { section, index } => edit(&panel, section, index, "").await?,
        },
    }

    while let Ok(change) = changes.try_recv() {
        let before: Vec<SectionKey> = SectionKey::ALL.into_iter().filter(|k| menu.contains(*k)).collect();
        menu.apply_change(&change, area);
        if let Ok(key) = change.key.parse::<SectionKey>() {
            let now = menu.contains(key);
            if now != before.contains(&key) {
                let verb = if now { "added" } else { "removed" };
                println!("context menu: {verb} {}", key.label());
            }
        }
    }

    print_sections(&store.load_preferences().await, None);
    Ok(())
}

async fn edit(panel: &SettingsPanel, section: SectionKey, index: usize, value: &str) -> Result<()> {
    if !panel.edit_url(section, index, value)? {
        bail!("{value:?} is not a valid http(s) URL or domain");
    }
    panel.flush().await;
    Ok(())
}

fn print_sections(prefs: &PreferenceDocument, tab: Option<SectionKey>) {
    let ids: Vec<String> = TAB_ORDER.iter().map(|k| k.as_str().to_string()).collect();
    let shown: Vec<SectionKey> = match (tab, TabSelector::new(ids.clone(), ids)) {
        (Some(tab), Some(mut selector)) => {
            selector.activate(tab.as_str());
            selector
                .active_panels()
                .filter_map(|id| id.parse().ok())
                .collect()
        }
        _ => TAB_ORDER.to_vec(),
    };

    for key in shown {
        let section = prefs.section(key);
        let state = if section.active { "" } else { " (disabled)" };
        println!("[{}]{state}", key.label());

        let nodes = section_options(key, section);
        for (node, visible) in nodes.iter().zip(visible_set(&nodes)) {
            if !visible {
                continue;
            }
            let indent = "  ".repeat(node.level.unwrap_or(1) as usize);
            let mark = if node.checked == Some(true) { "x" } else { " " };
            println!("{indent}[{mark}] {}", node.label);
        }
        println!("  lookups:");
        for (i, url) in section.urls.iter().enumerate() {
            println!("  {i:>3}. {url}");
        }
    }
}
