//! Compiled tables and the entry points that produce them

use read_charmaps::{tables::TableKind, Charmap};

use crate::{
    encoder::build_encoder,
    error::CompileError,
    extended_ascii::ExtendedAscii,
    state_machine::StateTable,
    write::{dump_table, TableWrite, TableWriter},
};

/// A compiled table, ready to be serialized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Table {
    ExtendedAscii(ExtendedAscii),
    StateMachine(StateTable),
}

impl Table {
    pub fn kind(&self) -> TableKind {
        match self {
            Table::ExtendedAscii(_) => TableKind::ExtendedAscii,
            Table::StateMachine(_) => TableKind::StateMachine,
        }
    }

    /// The bytes of this table: the kind discriminator followed by the payload.
    pub fn serialize(&self) -> Vec<u8> {
        dump_table(self)
    }
}

impl TableWrite for Table {
    fn write_into(&self, writer: &mut TableWriter) {
        self.kind().to_u8().write_into(writer);
        match self {
            Table::ExtendedAscii(table) => table.write_into(writer),
            Table::StateMachine(table) => table.write_into(writer),
        }
    }
}

/// Compile the conversion table for a charmap.
///
/// Only charmaps that qualify for an [`ExtendedAscii`] table are supported;
/// anything else returns [`CompileError::Unsupported`].
pub fn compile(charmap: &Charmap) -> Result<Table, CompileError> {
    let table = ExtendedAscii::from_charmap(charmap)?;
    log::debug!(
        "built extended ASCII table with {} high characters",
        table.high_chars().iter().flatten().count()
    );
    Ok(Table::ExtendedAscii(table))
}

/// Compile the state machine that converts Unicode text to this charmap.
pub fn compile_encoder(charmap: &Charmap) -> Result<Table, CompileError> {
    let trie = build_encoder(charmap)?;
    Ok(Table::StateMachine(trie.compile()?))
}
