//! Interactive prompts for install and uninstall

use crate::core::error::Result;
use crate::core::types::Preset;
use dialoguer::{Confirm, Select, theme::ColorfulTheme};
use std::path::Path;

/// Labels offered by the preset prompt, in `Preset::ALL` order
pub fn preset_labels() -> Vec<&'static str> {
    Preset::ALL.iter().map(Preset::label).collect()
}

/// Ask which logging preset to install
pub fn select_preset() -> Result<Preset> {
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Choose a logging preset")
        .items(&preset_labels())
        .default(0)
        .interact()?;

    Ok(Preset::ALL[index])
}

/// Ask whether the user's logger configuration should be deleted too
pub fn confirm_remove_config(path: &Path) -> Result<bool> {
    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!(
            "Also remove the logger configuration {}?",
            path.display()
        ))
        .default(false)
        .interact()?;

    Ok(confirmed)
}
