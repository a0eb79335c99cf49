use crate::error::Result;
use crate::logging::active_log_dir;
use crate::settings::{load_settings, log_dir, save_settings, settings_path, Settings};

/// Update the settings file. Options that were not passed keep their saved value.
pub fn run(name: Option<String>, seed: bool, no_seed: bool) -> Result<()> {
    let mut settings = load_settings();
    apply(&mut settings, name, seed_choice(seed, no_seed));
    save_settings(&settings)?;
    log::info!(
        "event=settings_saved seed_sample_data={}",
        settings.seed_sample_data
    );

    println!("Settings written to {}", settings_path().display());
    let logs = active_log_dir().map(|p| p.to_path_buf()).unwrap_or_else(log_dir);
    println!("Logs: {}", logs.display());
    Ok(())
}

fn seed_choice(seed: bool, no_seed: bool) -> Option<bool> {
    match (seed, no_seed) {
        (_, true) => Some(false),
        (true, false) => Some(true),
        (false, false) => None,
    }
}

fn apply(settings: &mut Settings, name: Option<String>, seed: Option<bool>) {
    if let Some(name) = name {
        settings.user_name = name.trim().to_string();
    }
    if let Some(seed) = seed {
        settings.seed_sample_data = seed;
    }
}
