use std::iter::once;

use rodio::DeviceTrait;

use crate::ChimeResult;

#[macro_export]
macro_rules! colorprintln {
    ($fmt:literal, $col:ident $(,$item:expr)* $(,)?) => {
        println!("{}", colored::Colorize::$col(format!($fmt, $($item),*).as_str()))
    };
}

pub fn list_output_devices() -> ChimeResult<()> {
    for (i, device) in rodio::output_devices()?.enumerate() {
        colorprintln!("{}. {}", bright_cyan, i, device.name()?);
    }
    Ok(())
}

pub fn parse_commands(text: &str) -> Option<Vec<Vec<String>>> {
    if text.trim().is_empty() {
        None
    } else {
        Some(
            text.split(',')
                .map(|text| {
                    once("chimeboard".into())
                        .chain(parse_args(text.trim()))
                        .collect()
                })
                .collect(),
        )
    }
}

pub fn parse_args(s: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut in_quotes = false;
    let mut arg = String::new();
    macro_rules! insert_arg {
        () => {{
            let mut next_arg = String::new();
            std::mem::swap(&mut next_arg, &mut arg);
            args.push(next_arg);
        }};
    }
    for c in s.chars() {
        match c {
            '"' => {
                if in_quotes {
                    in_quotes = false;
                    insert_arg!();
                } else {
                    in_quotes = true;
                }
            }
            c if c.is_whitespace() => {
                if in_quotes {
                    arg.push(c)
                } else if !arg.is_empty() {
                    insert_arg!();
                }
            }
            c => arg.push(c),
        }
    }
    if !arg.is_empty() {
        insert_arg!();
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_split_on_whitespace_and_respect_quotes() {
        assert_eq!(parse_args("press a 10 20"), ["press", "a", "10", "20"]);
        assert_eq!(parse_args("song \"twinkle\""), ["song", "twinkle"]);
    }

    #[test]
    fn blank_command_lines_parse_to_none() {
        assert!(parse_commands("   ").is_none());
    }

    #[test]
    fn commands_split_on_commas_with_binary_name_prefixed() {
        let commands = parse_commands("melody, press a").unwrap();
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0], ["chimeboard", "melody"]);
        assert_eq!(commands[1], ["chimeboard", "press", "a"]);
    }
}
