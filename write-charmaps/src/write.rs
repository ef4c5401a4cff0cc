use std::fmt::{Debug, Formatter};

/// A type that can be written out as part of a compiled table.
pub trait TableWrite {
    /// Write our data into this [TableWriter].
    fn write_into(&self, writer: &mut TableWriter);
}

/// Accumulates the big-endian bytes of a table.
#[derive(Default)]
pub struct TableWriter {
    bytes: Vec<u8>,
}

/// Serialize a table.
pub fn dump_table<T: TableWrite + ?Sized>(table: &T) -> Vec<u8> {
    let mut writer = TableWriter::default();
    table.write_into(&mut writer);
    writer.into_data()
}

impl TableWriter {
    /// Write raw bytes into this table.
    ///
    /// The caller is responsible for ensuring bytes are in big-endian order.
    #[inline]
    pub fn write_slice(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes)
    }

    /// Write `bytes` preceded by their length as a single byte.
    ///
    /// # Panics
    ///
    /// If `bytes` is longer than 255.
    pub fn write_len_prefixed(&mut self, bytes: &[u8]) {
        let len = u8::try_from(bytes.len()).expect("length prefixed data exceeds 255 bytes");
        len.write_into(self);
        self.write_slice(bytes);
    }

    /// The number of bytes written so far.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub(crate) fn into_data(self) -> Vec<u8> {
        self.bytes
    }
}

impl Debug for TableWriter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableWriter")
            .field("len", &self.bytes.len())
            .finish()
    }
}

macro_rules! write_be_bytes {
    ($ty:ty) => {
        impl TableWrite for $ty {
            #[inline]
            fn write_into(&self, writer: &mut TableWriter) {
                writer.write_slice(&self.to_be_bytes())
            }
        }
    };
}

write_be_bytes!(u8);
write_be_bytes!(u16);

impl<T: TableWrite> TableWrite for [T] {
    fn write_into(&self, writer: &mut TableWriter) {
        self.iter().for_each(|item| item.write_into(writer))
    }
}
