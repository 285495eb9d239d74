// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Pretty printers for reporting information. Lines are grouped into blocks
//! and drawn as a tree under a bold title.

use std::{borrow::Cow, sync::Mutex};

use log::Level;

const VERTICAL: char = '│';
const UP_AND_RIGHT: char = '└';
const VERTICAL_AND_RIGHT: char = '├';

type Block = Vec<Cow<'static, str>>;

lazy_static::lazy_static! {
    static ref PENDING_WARNINGS: Mutex<Vec<Block>> = Mutex::new(vec![]);
}

fn draw(level: Level, title: &str, blocks: &[Block]) {
    log::log!(level, "{}", console::style(title).bold());
    let num_blocks = blocks.len();
    for (i_block, block) in blocks.iter().enumerate() {
        let num_lines = block.len();
        for (i_line, line) in block.iter().enumerate() {
            let symbol = match (i_line, i_line + 1 == num_lines, i_block + 1 == num_blocks) {
                (0, false, _) => VERTICAL_AND_RIGHT,
                (0, _, false) => VERTICAL_AND_RIGHT,
                (0, true, true) => UP_AND_RIGHT,
                _ => VERTICAL,
            };
            log::log!(level, "{symbol} {line}");
        }
    }
    log::log!(level, "");
}

pub(crate) struct InfoPrinter {
    title: Cow<'static, str>,
    blocks: Vec<Block>,
}

impl InfoPrinter {
    pub(crate) fn new(title: Cow<'static, str>) -> Self {
        Self {
            title,
            blocks: vec![],
        }
    }

    pub(crate) fn push_line(&mut self, line: Cow<'static, str>) {
        self.blocks.push(vec![line]);
    }

    /// The first line of a block gets a branch; the rest hang off it.
    pub(crate) fn push_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub(crate) fn display(self) {
        draw(Level::Info, &self.title, &self.blocks);
    }
}

/// Anything that can be queued up as a warning for the user. Warnings are
/// only shown when [`display_warnings`] is called.
pub(crate) trait Warn {
    fn warn(self);
}

fn push_warning(block: Block) {
    // Warnings are still usable after another thread panicked holding the lock.
    PENDING_WARNINGS
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .push(block);
}

impl Warn for &'static str {
    fn warn(self) {
        push_warning(vec![self.into()]);
    }
}

impl Warn for String {
    fn warn(self) {
        push_warning(vec![self.into()]);
    }
}

impl Warn for Cow<'static, str> {
    fn warn(self) {
        push_warning(vec![self]);
    }
}

impl Warn for Vec<Cow<'static, str>> {
    fn warn(self) {
        push_warning(self);
    }
}

impl<const N: usize> Warn for [Cow<'static, str>; N] {
    fn warn(self) {
        push_warning(self.to_vec());
    }
}

/// Print out any warnings that have been collected, then forget them.
pub(crate) fn display_warnings() {
    log::debug!("Displaying warnings");
    let blocks = std::mem::take(
        &mut *PENDING_WARNINGS
            .lock()
            .unwrap_or_else(|e| e.into_inner()),
    );
    if !blocks.is_empty() {
        draw(Level::Warn, "Warnings", &blocks);
    }
}
