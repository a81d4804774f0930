//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
///
/// Later sources override these key by key, so a file that only sets
/// `canvas.width` still inherits the default height.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("canvas.width", 1024_i64)?
        .set_default("canvas.height", 576_i64)?
        .set_default("picture.box_size", 180_i64)?
        .set_default("picture.fit", "contain")?
        .set_default("output.dir", "output")
}
