//! Console rendering of configurations.

use turing_engine::Configuration;

const HIGHLIGHT_START: &str = "\x1b[0;31m";
const HIGHLIGHT_END: &str = "\x1b[0m";
const GAP: &str = "..";

/// Renders `Configuration(state, Tape(...), cursor)`, optionally highlighting the cell under
/// the cursor. The cursor cell is always shown, even when it lies outside the stored cells.
/// Long stretches of blank cells are elided.
pub fn configuration(configuration: &Configuration, highlight: bool) -> String {
    format!(
        "Configuration({}, {}, {})",
        configuration.state(),
        tape(configuration, highlight),
        configuration.cursor()
    )
}

fn tape(configuration: &Configuration, highlight: bool) -> String {
    let cursor = configuration.cursor();

    let cells = configuration
        .tape()
        .layout(Some(cursor))
        .into_iter()
        .map(|cell| match cell {
            Some((position, symbol)) if highlight && position == cursor => {
                format!("{HIGHLIGHT_START}{symbol}{HIGHLIGHT_END}")
            }
            Some((_, symbol)) => symbol.to_string(),
            None => GAP.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ");

    format!("Tape({cells})")
}

#[cfg(test)]
mod tests {
    use super::*;
    use turing_engine::Tape;

    #[test]
    fn test_plain_rendering() {
        let configuration = Configuration::new("q0", Tape::new("*||*|*".chars(), 0).unwrap(), 5);

        assert_eq!(
            configuration_string(&configuration, false),
            "Configuration(q0, Tape(* | | * | *), 5)"
        );
    }

    #[test]
    fn test_highlighted_cursor() {
        let configuration = Configuration::new("q1", Tape::new("*|".chars(), 0).unwrap(), 1);

        assert_eq!(
            configuration_string(&configuration, true),
            "Configuration(q1, Tape(* \x1b[0;31m|\x1b[0m), 1)"
        );
    }

    #[test]
    fn test_cursor_outside_stored_run() {
        let configuration = Configuration::new("q0", Tape::new("ab".chars(), 0).unwrap(), -2);

        assert_eq!(
            configuration_string(&configuration, false),
            "Configuration(q0, Tape(_ _ a b), -2)"
        );
    }

    #[test]
    fn test_far_cursor_is_elided() {
        let configuration =
            Configuration::new("q0", Tape::new("ab".chars(), 0).unwrap(), 1 << 40);

        assert_eq!(
            configuration_string(&configuration, false),
            "Configuration(q0, Tape(a b .. _), 1099511627776)"
        );
    }

    fn configuration_string(configuration: &Configuration, highlight: bool) -> String {
        super::configuration(configuration, highlight)
    }
}
