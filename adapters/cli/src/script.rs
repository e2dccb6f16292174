//! Scripted directional input for headless runs.
//!
//! A script is a comma separated list of `keys*ticks` phases, for example
//! `r*30,dr*10,-*5`. Keys are any of `u`, `d`, `l`, `r`; `-` holds nothing.
//! A phase without `*ticks` lasts one tick. The script repeats once exhausted.

use std::str::FromStr;

use tile_defence_core::InputSnapshot;

/// Parsed input script.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct InputScript {
    phases: Vec<(InputSnapshot, u64)>,
    period: u64,
}

impl InputScript {
    /// Input held on the provided zero-based tick.
    pub(crate) fn input_at(&self, tick: u64) -> InputSnapshot {
        if self.period == 0 {
            return InputSnapshot::default();
        }
        let mut remaining = tick % self.period;
        for (input, ticks) in &self.phases {
            if remaining < *ticks {
                return *input;
            }
            remaining -= ticks;
        }
        InputSnapshot::default()
    }
}

impl FromStr for InputScript {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut phases = Vec::new();
        for phase in value.split(',').map(str::trim).filter(|phase| !phase.is_empty()) {
            let (keys, ticks) = match phase.split_once('*') {
                Some((keys, ticks)) => {
                    let ticks = ticks
                        .trim()
                        .parse::<u64>()
                        .map_err(|error| format!("invalid tick count in {phase:?}: {error}"))?;
                    (keys.trim(), ticks)
                }
                None => (phase, 1),
            };
            phases.push((parse_keys(keys)?, ticks));
        }
        let period = phases
            .iter()
            .try_fold(0u64, |total, (_, ticks)| total.checked_add(*ticks))
            .ok_or_else(|| "script period overflows".to_owned())?;
        Ok(Self { phases, period })
    }
}

fn parse_keys(keys: &str) -> Result<InputSnapshot, String> {
    let mut input = InputSnapshot::default();
    if keys == "-" {
        return Ok(input);
    }
    for key in keys.chars() {
        match key.to_ascii_lowercase() {
            'u' => input.up = true,
            'd' => input.down = true,
            'l' => input.left = true,
            'r' => input.right = true,
            other => return Err(format!("unknown input key {other:?}")),
        }
    }
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(up: bool, down: bool, left: bool, right: bool) -> InputSnapshot {
        InputSnapshot {
            up,
            down,
            left,
            right,
        }
    }

    #[test]
    fn phases_repeat_in_order() {
        let script: InputScript = "r*2,-,ul*1".parse().expect("script");
        let inputs: Vec<InputSnapshot> = (0..6).map(|tick| script.input_at(tick)).collect();
        assert_eq!(
            inputs,
            vec![
                keys(false, false, false, true),
                keys(false, false, false, true),
                InputSnapshot::default(),
                keys(true, false, true, false),
                keys(false, false, false, true),
                keys(false, false, false, true),
            ]
        );
    }

    #[test]
    fn empty_script_holds_nothing() {
        let script: InputScript = "".parse().expect("script");
        assert_eq!(script.input_at(42), InputSnapshot::default());
        assert_eq!(script, InputScript::default());
    }

    #[test]
    fn zero_length_phases_are_skipped() {
        let script: InputScript = "u*0,d*3".parse().expect("script");
        assert_eq!(script.input_at(0), keys(false, true, false, false));
    }

    #[test]
    fn rejects_unknown_keys_and_counts() {
        assert!("x".parse::<InputScript>().is_err());
        assert!("r*many".parse::<InputScript>().is_err());
    }

    #[test]
    fn rejects_periods_beyond_the_tick_range() {
        let error = "r*18446744073709551615,l*1"
            .parse::<InputScript>()
            .expect_err("period overflows");
        assert_eq!(error, "script period overflows");
        assert!("r*18446744073709551615".parse::<InputScript>().is_ok());
    }
}
