// src/layout.rs
//
// Builds the two-column section that replaces the input panel's content.

use crate::error::{Error, Result};
use crate::plan::{self, Block, Column};

/// Blocks lifted out of the page, ready to be placed into columns.
#[derive(Debug, Default)]
pub struct Blocks {
    panels: Vec<(&'static str, String)>,
    button_group: String,
}

impl Blocks {
    pub fn new(panels: Vec<(&'static str, String)>, button_group: String) -> Self {
        Self {
            panels,
            button_group,
        }
    }

    pub fn panel(&self, key: &str) -> Option<&str> {
        self.panels
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, html)| html.as_str())
    }

    fn get(&self, block: Block) -> Result<&str> {
        match block {
            Block::Panel(key) => self
                .panel(key)
                .ok_or_else(|| Error::missing(plan::placeholder(key))),
            Block::ButtonGroup => Ok(self.button_group.as_str()),
        }
    }
}

/// Prefix every line of `block` with `indent`, joining with '\n'.
/// A trailing newline in `block` is dropped.
pub fn indent_block(block: &str, indent: &str) -> String {
    let mut out = String::with_capacity(block.len() + indent.len() * 8);
    for (n, line) in block.lines().enumerate() {
        if n > 0 {
            out.push('\n');
        }
        out.push_str(indent);
        out.push_str(line);
    }
    out
}

fn render_column(column: &Column, blocks: &Blocks, indent: &str, out: &mut String) -> Result<()> {
    let inner = format!("{indent}{}", plan::BLOCK_INDENT);

    out.push_str(&format!("{indent}<!-- {} -->\n", column.comment));
    out.push_str(&format!("{indent}<div class=\"{}\">\n", column.class));
    for &block in column.blocks {
        out.push_str(&indent_block(blocks.get(block)?, &inner));
        out.push('\n');
    }
    out.push_str(indent);
    out.push_str(plan::DIV_CLOSE);
    Ok(())
}

/// Render the replacement section. It starts and ends with a newline.
pub fn render(columns: &[Column], blocks: &Blocks, indent: &str) -> Result<String> {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&format!(
        "{indent}<div class=\"{}\">\n",
        plan::CONTAINER_CLASS
    ));
    for column in columns {
        render_column(column, blocks, indent, &mut out)?;
        out.push('\n');
    }
    out.push_str(indent);
    out.push_str(plan::DIV_CLOSE);
    out.push('\n');
    Ok(out)
}
