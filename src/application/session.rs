//! Interactive menu over an integer tree
//!
//! Reads choices and values line by line, so any `BufRead`/`Write` pair can drive it.

use std::io::{BufRead, Write};

use tracing::{debug, info, instrument};

use crate::application::{ApplicationResult, IoResultExt};
use crate::config::{RenderStyle, Settings};
use crate::domain::{AvlTree, TreeOutline};

const OPTIONS: [&str; 4] = [
    "Insert a number into the AVL tree",
    "Delete a number from the AVL tree",
    "Print the AVL tree",
    "Exit",
];

/// Outcome of asking for a value.
enum Prompted {
    Value(i64),
    Rejected,
    Closed,
}

/// Menu entries, numbered as printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Insert = 1,
    Delete = 2,
    Print = 3,
    Exit = 4,
}

impl MenuChoice {
    /// Parses a menu selection; anything outside 1..=4 is rejected.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().parse::<u8>().ok()? {
            1 => Some(Self::Insert),
            2 => Some(Self::Delete),
            3 => Some(Self::Print),
            4 => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Renders `tree` as lines in the requested style.
pub fn render_lines(tree: &AvlTree<i64>, style: RenderStyle) -> Vec<String> {
    match style {
        RenderStyle::Grid => tree.render(),
        RenderStyle::Outline => tree
            .to_outline()
            .to_string()
            .lines()
            .map(str::to_string)
            .collect(),
    }
}

/// Rendered rows ready for printing, each behind `prefix`.
///
/// The empty-tree sentinel is printed bare.
pub fn printable_lines(tree: &AvlTree<i64>, style: RenderStyle, prefix: &str) -> Vec<String> {
    let lines = render_lines(tree, style);
    if tree.is_empty() {
        return lines;
    }
    lines.into_iter().map(|row| format!("{prefix}{row}")).collect()
}

/// One interactive session owning its tree.
#[derive(Debug)]
pub struct Session {
    tree: AvlTree<i64>,
    row_prefix: String,
    rule_width: usize,
    style: RenderStyle,
}

impl Session {
    /// Creates a session, inserting the configured preload values.
    pub fn new(settings: &Settings) -> Self {
        let tree: AvlTree<i64> = settings.preload.iter().copied().collect();
        debug!("session preloaded with {} values", tree.len());
        Self {
            tree,
            row_prefix: settings.row_prefix.clone(),
            rule_width: settings.rule_width,
            style: settings.style,
        }
    }

    pub fn tree(&self) -> &AvlTree<i64> {
        &self.tree
    }

    /// Runs the menu loop until "Exit" is chosen or input ends.
    #[instrument(level = "debug", skip_all)]
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        mut input: R,
        mut output: W,
    ) -> ApplicationResult<()> {
        loop {
            self.write_menu(&mut output)?;
            let Some(line) = read_line(&mut input)? else {
                info!("input closed, leaving menu");
                return Ok(());
            };

            match MenuChoice::parse(&line) {
                None => writeln!(output, "Invalid choice, try again!").io_context("write menu")?,
                Some(MenuChoice::Insert) => match prompt_value(&mut input, &mut output, "insert")? {
                    Prompted::Value(value) => self.tree.insert(value),
                    Prompted::Rejected => {}
                    Prompted::Closed => return Ok(()),
                },
                Some(MenuChoice::Delete) => match prompt_value(&mut input, &mut output, "delete")? {
                    Prompted::Value(value) => self.tree.remove(&value),
                    Prompted::Rejected => {}
                    Prompted::Closed => return Ok(()),
                },
                Some(MenuChoice::Print) => self.write_tree(&mut output)?,
                Some(MenuChoice::Exit) => return Ok(()),
            }
        }
    }

    fn write_menu<W: Write>(&self, output: &mut W) -> ApplicationResult<()> {
        writeln!(output, "{}", "-".repeat(self.rule_width)).io_context("write menu")?;
        for (i, option) in OPTIONS.iter().enumerate() {
            writeln!(output, "{}. {}", i + 1, option).io_context("write menu")?;
        }
        write!(output, "Choose an option: ").io_context("write menu")?;
        output.flush().io_context("flush output")
    }

    fn write_tree<W: Write>(&self, output: &mut W) -> ApplicationResult<()> {
        writeln!(output).io_context("write tree")?;
        for row in printable_lines(&self.tree, self.style, &self.row_prefix) {
            writeln!(output, "{}", row).io_context("write tree")?;
        }
        writeln!(output).io_context("write tree")
    }
}

/// Prompts for an integer; a non-integer answer is reported and rejected.
fn prompt_value<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    action: &str,
) -> ApplicationResult<Prompted> {
    write!(output, "Enter an integer to {}: ", action).io_context("write prompt")?;
    output.flush().io_context("flush output")?;

    let Some(line) = read_line(input)? else {
        return Ok(Prompted::Closed);
    };
    match line.trim().parse::<i64>() {
        Ok(value) => Ok(Prompted::Value(value)),
        Err(e) => {
            debug!("rejected value {:?}: {}", line, e);
            writeln!(output, "Not an integer: {}", line.trim()).io_context("write prompt")?;
            Ok(Prompted::Rejected)
        }
    }
}

/// Next input line without its line ending, `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> ApplicationResult<Option<String>> {
    let mut line = String::new();
    let read = input.read_line(&mut line).io_context("read input")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
