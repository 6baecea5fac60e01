//! `socintel menu` – list registered context-menu items.

use anyhow::Result;
use socintel_core::menu::ContextMenu;
use socintel_core::prefs::PreferenceStore;

pub async fn run_menu(store: &PreferenceStore) -> Result<()> {
    let stored = store.get_all().await?;
    let mut menu = ContextMenu::new();
    menu.sync_from_storage(&stored);

    let mut any = false;
    for item in menu.items() {
        println!("{:<16} {:<6} ({})", item.id, item.title, item.context);
        any = true;
    }
    if !any {
        println!("No active lookup sections.");
    }
    Ok(())
}
