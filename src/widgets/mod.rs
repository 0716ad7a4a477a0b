//! Built-in widget blocks
//!
//! | path                     | value  |
//! |--------------------------|--------|
//! | `/widgets/odometer`      | i64    |
//! | `/widgets/digit_spinner` | f64    |
//! | `/widgets/slider`        | f64    |
//! | `/widgets/text_entry`    | string |
//! | `/widgets/colored_box`   | color  |

mod colored_box;
mod digits;
mod slider;
mod text_entry;

use crate::host::BlockRegistry;

/// Register every built-in block
pub fn register_all(registry: &mut BlockRegistry) {
    registry.register(digits::ODOMETER);
    registry.register(digits::DIGIT_SPINNER);
    registry.register(slider::ENTRY);
    registry.register(text_entry::ENTRY);
    registry.register(colored_box::ENTRY);
}
