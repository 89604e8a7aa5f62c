use crate::context::AppContext;
use crate::error::AppError;
use crate::settings::AppSettings;

pub fn config(context: &AppContext, reset: bool) -> Result<(), AppError> {
    let path = context.paths.settings_file();

    let settings = if reset {
        let defaults = AppSettings::default();
        defaults
            .save(&context.paths)
            .map_err(|error| AppError::operation_failed("Reset settings", error))?;
        println!("Settings reset to defaults.");
        defaults
    } else {
        context.settings.clone()
    };

    let rendered = serde_json::to_string_pretty(&settings)
        .map_err(|error| AppError::operation_failed("Render settings", error))?;

    println!("{}", path.display());
    println!("{rendered}");
    Ok(())
}
