//! Environment source: `AGENTCARD_<SECTION>__<KEY>`, e.g. `AGENTCARD_CANVAS__WIDTH=800`.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("AGENTCARD")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    )
}
