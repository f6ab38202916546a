use std::io::{ErrorKind, Read, Write};
use std::vec::IntoIter;

use crate::reader::ReadAdaptor;
use crate::tag::NbtTag;
use crate::writer::WriteAdaptor;
use crate::{get_nbt_string, Error, Nbt, Result, END_ID};

/// An insertion-ordered mapping from tag name to tag. Keys are unique
/// within one compound; a duplicate `put` is ignored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NbtCompound {
    pub child_tags: Vec<(String, NbtTag)>,
}

impl NbtCompound {
    pub fn new() -> NbtCompound {
        NbtCompound {
            child_tags: Vec::new(),
        }
    }

    pub fn deserialize_content<R>(reader: &mut ReadAdaptor<R>) -> Result<NbtCompound>
    where
        R: Read,
    {
        let mut compound = NbtCompound::new();

        loop {
            let tag_id = match reader.get_u8_be() {
                Ok(id) => id,
                Err(Error::Incomplete(err)) if err.kind() == ErrorKind::UnexpectedEof => break,
                Err(err) => return Err(err),
            };
            if tag_id == END_ID {
                break;
            }

            let name = get_nbt_string(reader)?;
            let tag = NbtTag::deserialize_data(reader, tag_id)?;
            compound.put(&name, tag);
        }

        Ok(compound)
    }

    pub fn skip_content<R>(reader: &mut ReadAdaptor<R>) -> Result<()>
    where
        R: Read,
    {
        loop {
            let tag_id = match reader.get_u8_be() {
                Ok(id) => id,
                Err(Error::Incomplete(err)) if err.kind() == ErrorKind::UnexpectedEof => break,
                Err(err) => return Err(err),
            };
            if tag_id == END_ID {
                break;
            }

            let len = reader.get_u16_be()?;
            reader.skip_bytes(len as u64)?;
            NbtTag::skip_data(reader, tag_id)?;
        }

        Ok(())
    }

    pub fn serialize_content<W>(&self, w: &mut WriteAdaptor<W>) -> Result<()>
    where
        W: Write,
    {
        for (name, tag) in &self.child_tags {
            w.write_u8_be(tag.get_type_id())?;
            NbtTag::String(name.clone()).serialize_data(w)?;
            tag.serialize_data(w)?;
        }
        w.write_u8_be(END_ID)
    }

    pub fn put(&mut self, name: &str, value: impl Into<NbtTag>) {
        if !self.child_tags.iter().any(|(key, _)| key == name) {
            self.child_tags.push((name.to_string(), value.into()));
        }
    }

    pub fn put_byte(&mut self, name: &str, value: i8) {
        self.put(name, NbtTag::Byte(value));
    }

    pub fn put_bool(&mut self, name: &str, value: bool) {
        self.put(name, NbtTag::Byte(value as i8));
    }

    pub fn put_short(&mut self, name: &str, value: i16) {
        self.put(name, NbtTag::Short(value));
    }

    pub fn put_int(&mut self, name: &str, value: i32) {
        self.put(name, NbtTag::Int(value));
    }

    pub fn put_long(&mut self, name: &str, value: i64) {
        self.put(name, NbtTag::Long(value));
    }

    pub fn put_float(&mut self, name: &str, value: f32) {
        self.put(name, NbtTag::Float(value));
    }

    pub fn put_double(&mut self, name: &str, value: f64) {
        self.put(name, NbtTag::Double(value));
    }

    pub fn put_string(&mut self, name: &str, value: impl Into<String>) {
        self.put(name, NbtTag::String(value.into()));
    }

    pub fn put_byte_array(&mut self, name: &str, value: Box<[u8]>) {
        self.put(name, NbtTag::ByteArray(value));
    }

    pub fn put_int_array(&mut self, name: &str, value: Box<[i32]>) {
        self.put(name, NbtTag::IntArray(value));
    }

    pub fn put_compound(&mut self, name: &str, value: NbtCompound) {
        self.put(name, NbtTag::Compound(value));
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&NbtTag> {
        self.child_tags
            .iter()
            .find(|(key, _)| key.as_str() == name)
            .map(|(_, value)| value)
    }

    pub fn get_byte(&self, name: &str) -> Option<i8> {
        self.get(name).and_then(|tag| tag.extract_byte())
    }

    pub fn get_short(&self, name: &str) -> Option<i16> {
        self.get(name).and_then(|tag| tag.extract_short())
    }

    pub fn get_int(&self, name: &str) -> Option<i32> {
        self.get(name).and_then(|tag| tag.extract_int())
    }

    pub fn get_long(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(|tag| tag.extract_long())
    }

    pub fn get_float(&self, name: &str) -> Option<f32> {
        self.get(name).and_then(|tag| tag.extract_float())
    }

    pub fn get_double(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(|tag| tag.extract_double())
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(|tag| tag.extract_bool())
    }

    pub fn get_string(&self, name: &str) -> Option<&String> {
        self.get(name).and_then(|tag| tag.extract_string())
    }

    pub fn get_byte_array(&self, name: &str) -> Option<&[u8]> {
        self.get(name).and_then(|tag| tag.extract_byte_array())
    }

    pub fn get_int_array(&self, name: &str) -> Option<&[i32]> {
        self.get(name).and_then(|tag| tag.extract_int_array())
    }

    pub fn get_compound(&self, name: &str) -> Option<&NbtCompound> {
        self.get(name).and_then(|tag| tag.extract_compound())
    }

    pub fn len(&self) -> usize {
        self.child_tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.child_tags.is_empty()
    }
}

impl From<Nbt> for NbtCompound {
    fn from(value: Nbt) -> Self {
        value.root_tag
    }
}

impl FromIterator<(String, NbtTag)> for NbtCompound {
    fn from_iter<T: IntoIterator<Item = (String, NbtTag)>>(iter: T) -> Self {
        let mut compound = NbtCompound::new();
        for (key, value) in iter {
            compound.put(&key, value);
        }
        compound
    }
}

impl IntoIterator for NbtCompound {
    type Item = (String, NbtTag);
    type IntoIter = IntoIter<(String, NbtTag)>;

    fn into_iter(self) -> Self::IntoIter {
        self.child_tags.into_iter()
    }
}

impl Extend<(String, NbtTag)> for NbtCompound {
    fn extend<T: IntoIterator<Item = (String, NbtTag)>>(&mut self, iter: T) {
        self.child_tags.extend(iter)
    }
}

#[cfg(test)]
mod test {
    use super::NbtCompound;
    use crate::tag::NbtTag;

    #[test]
    fn duplicate_keys_keep_first() {
        let mut compound = NbtCompound::new();
        compound.put_int("SpawnX", 1);
        compound.put_int("SpawnX", 2);
        assert_eq!(compound.get_int("SpawnX"), Some(1));
        assert_eq!(compound.len(), 1);
    }

    #[test]
    fn typed_getter_rejects_mismatched_kind() {
        let mut compound = NbtCompound::new();
        compound.put_string("raining", "true");
        assert_eq!(compound.get_byte("raining"), None);
        assert!(matches!(
            compound.get("raining"),
            Some(NbtTag::String(s)) if s == "true"
        ));
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut compound = NbtCompound::new();
        compound.put_int("c", 3);
        compound.put_int("a", 1);
        compound.put_int("b", 2);
        let keys: Vec<_> = compound
            .child_tags
            .iter()
            .map(|(k, _)| k.as_str())
            .collect();
        assert_eq!(keys, ["c", "a", "b"]);
    }
}
