pub mod config;
pub mod logging;

pub mod checksum;
pub mod ioc;
pub mod menu;
pub mod pivot;
pub mod prefs;
pub mod sanitise;
pub mod settings;
pub mod template;
pub mod ui;
