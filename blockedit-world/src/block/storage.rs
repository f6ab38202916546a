use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use base64::prelude::{Engine, BASE64_STANDARD};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::block::{Block, BlockData};
use crate::error::DataError;

/// Serializes a block definition to the `.blk` container: an XML document,
/// base64-encoded, gzip-compressed.
pub fn write_block(block: &Block, output: impl Write) -> Result<(), DataError> {
    let document = block_document(block)?;
    let encoded = BASE64_STANDARD.encode(document);

    let mut encoder = GzEncoder::new(output, Compression::default());
    encoder.write_all(encoded.as_bytes())?;
    encoder.finish()?;
    Ok(())
}

pub fn write_block_file(block: &Block, path: &Path) -> Result<(), DataError> {
    let file = OpenOptions::new()
        .truncate(true)
        .create(true)
        .write(true)
        .open(path)?;
    write_block(block, file)
}

/// Parses a block definition from the `.blk` container.
///
/// Structural violations of the outer document shape yield `Ok(None)`;
/// a malformed inner `<blockData>` entry is dropped from the result while
/// the rest of the document is still accepted. Transport-level problems
/// (bad gzip, bad base64, malformed XML) are errors.
pub fn read_block(input: impl Read) -> Result<Option<Block>, DataError> {
    let mut encoded = String::new();
    GzDecoder::new(input).read_to_string(&mut encoded)?;
    let document = String::from_utf8(BASE64_STANDARD.decode(encoded.trim())?)?;

    let root = parse_document(&document)?;
    let Some(block) = single(&root, "blocks").and_then(|blocks| single(blocks, "block")) else {
        return Ok(None);
    };
    let Some(id) = attribute(block, "id") else {
        return Ok(None);
    };
    let id: i32 = id.parse()?;

    let Some(name) = single(block, "name") else {
        return Ok(None);
    };
    let Some(display_name) = single(block, "displayName") else {
        return Ok(None);
    };
    let Some(containers) = single(block, "blockDatas") else {
        return Ok(None);
    };

    let mut data_values = Vec::new();
    for entry in containers.children.iter().filter(|c| c.name == "blockData") {
        let (data_id, image) = (single(entry, "id"), single(entry, "image"));
        let (Some(data_id), Some(image)) = (data_id, image) else {
            let missing = match (data_id.is_some(), image.is_some()) {
                (false, false) => "id and image",
                (false, true) => "id",
                _ => "image",
            };
            log::warn!("Dropping blockData entry without {missing}");
            continue;
        };
        let mut builder = BlockData::builder().data_value(data_id.text.parse()?);
        if !image.text.is_empty() {
            builder = builder.image(PathBuf::from(&image.text));
        }
        data_values.push(builder.build()?);
    }

    // Rebuilding through the builder recomputes the modded flag; the file
    // has no say in it.
    let block = Block::builder()
        .id(id)
        .name(name.text.as_str())
        .display_name(display_name.text.as_str())
        .data_values(data_values)
        .build()?;
    Ok(Some(block))
}

pub fn read_block_file(path: &Path) -> Result<Option<Block>, DataError> {
    read_block(File::open(path)?)
}

fn block_document(block: &Block) -> Result<Vec<u8>, DataError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.1", Some("UTF-8"), None)))?;

    writer.write_event(Event::Start(BytesStart::new("blocks")))?;
    let mut block_start = BytesStart::new("block");
    block_start.push_attribute(("id", block.id().to_string().as_str()));
    writer.write_event(Event::Start(block_start))?;

    text_element(&mut writer, "name", block.name())?;
    text_element(&mut writer, "displayName", block.display_name())?;

    writer.write_event(Event::Start(BytesStart::new("blockDatas")))?;
    for data in block.data_values() {
        writer.write_event(Event::Start(BytesStart::new("blockData")))?;
        text_element(&mut writer, "id", &data.data_value().to_string())?;
        text_element(&mut writer, "image", &image_text(data))?;
        writer.write_event(Event::End(BytesEnd::new("blockData")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("blockDatas")))?;

    writer.write_event(Event::End(BytesEnd::new("block")))?;
    writer.write_event(Event::End(BytesEnd::new("blocks")))?;

    Ok(writer.into_inner())
}

fn text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), DataError> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Image references are stored as absolute paths with backslashes doubled.
fn image_text(data: &BlockData) -> String {
    match data.image() {
        Some(path) => {
            let absolute = std::path::absolute(path).unwrap_or_else(|_| path.clone());
            absolute.to_string_lossy().replace('\\', "\\\\")
        }
        None => String::new(),
    }
}

/// A minimal document tree, just enough to apply the structural checks.
#[derive(Debug, Default)]
struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlElement>,
    text: String,
}

fn parse_document(input: &str) -> Result<XmlElement, DataError> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(true);

    // The synthetic bottom element stands in for the document itself.
    let mut stack = vec![XmlElement::default()];
    loop {
        match reader.read_event().map_err(quick_xml::Error::from)? {
            Event::Start(start) => {
                stack.push(element_from(&start)?);
            }
            Event::Empty(start) => {
                let element = element_from(&start)?;
                // The synthetic root is never popped, so the stack stays nonempty.
                stack.last_mut().unwrap().children.push(element);
            }
            Event::Text(text) => {
                let unescaped = text.unescape().map_err(quick_xml::Error::from)?;
                stack.last_mut().unwrap().text.push_str(&unescaped);
            }
            Event::End(_) => {
                let element = stack.pop().unwrap();
                stack.last_mut().unwrap().children.push(element);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(stack.pop().unwrap())
}

fn element_from(start: &BytesStart) -> Result<XmlElement, DataError> {
    let mut element = XmlElement {
        name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
        ..XmlElement::default()
    };
    for attribute in start.attributes() {
        let attribute = attribute.map_err(quick_xml::Error::from)?;
        element.attributes.push((
            String::from_utf8_lossy(attribute.key.as_ref()).into_owned(),
            attribute
                .unescape_value()
                .map_err(quick_xml::Error::from)?
                .into_owned(),
        ));
    }
    Ok(element)
}

/// The child named `name`, provided there is exactly one of them.
fn single<'a>(parent: &'a XmlElement, name: &str) -> Option<&'a XmlElement> {
    let mut matches = parent.children.iter().filter(|child| child.name == name);
    let first = matches.next()?;
    matches.next().is_none().then_some(first)
}

fn attribute<'a>(element: &'a XmlElement, name: &str) -> Option<&'a str> {
    element
        .attributes
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

#[cfg(test)]
mod test {
    use std::io::{Cursor, Write};

    use base64::prelude::{Engine, BASE64_STANDARD};
    use flate2::write::GzEncoder;
    use flate2::Compression;

    use super::{read_block, read_block_file, write_block, write_block_file};
    use crate::block::{Block, BlockData};
    use crate::error::DataError;

    fn sample_block() -> Block {
        Block::builder()
            .id(35)
            .name("minecraft:wool")
            .display_name("Wool")
            .data_values(vec![
                BlockData::builder()
                    .data_value(0)
                    .image("/textures/wool_white.png")
                    .build()
                    .unwrap(),
                BlockData::builder().data_value(14).build().unwrap(),
            ])
            .build()
            .unwrap()
    }

    /// Packs a raw XML document the way the writer does, for reader tests.
    fn pack(xml: &str) -> Vec<u8> {
        let encoded = BASE64_STANDARD.encode(xml);
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(encoded.as_bytes()).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn block_round_trip() {
        let block = sample_block();
        let mut buffer = Vec::new();
        write_block(&block, &mut buffer).unwrap();

        let read = read_block(Cursor::new(buffer)).unwrap().unwrap();
        assert_eq!(read, block);
        assert!(!read.is_modded());
    }

    #[test]
    fn modded_flag_is_recomputed_on_read() {
        let block = Block::builder()
            .id(4096)
            .name("examplemod:machine")
            .display_name("Machine")
            .build()
            .unwrap();
        let mut buffer = Vec::new();
        write_block(&block, &mut buffer).unwrap();

        let read = read_block(Cursor::new(buffer)).unwrap().unwrap();
        assert!(read.is_modded());
    }

    #[test]
    fn missing_display_name_reads_empty() {
        let xml = "<blocks><block id=\"1\"><name>minecraft:stone</name>\
                   <blockDatas/></block></blocks>";
        let read = read_block(Cursor::new(pack(xml))).unwrap();
        assert!(read.is_none());
    }

    #[test]
    fn missing_block_element_reads_empty() {
        let read = read_block(Cursor::new(pack("<blocks></blocks>"))).unwrap();
        assert!(read.is_none());

        let two = "<blocks><block id=\"1\"/><block id=\"2\"/></blocks>";
        assert!(read_block(Cursor::new(pack(two))).unwrap().is_none());
    }

    #[test]
    fn block_data_without_image_is_dropped() {
        let _ = env_logger::try_init();

        let xml = "<blocks><block id=\"1\"><name>minecraft:stone</name>\
                   <displayName>Stone</displayName><blockDatas>\
                   <blockData><id>0</id></blockData>\
                   </blockDatas></block></blocks>";
        let read = read_block(Cursor::new(pack(xml))).unwrap().unwrap();
        assert!(read.data_values().is_empty());
        assert_eq!(read.name(), "minecraft:stone");
    }

    #[test]
    fn negative_data_value_is_an_error() {
        let xml = "<blocks><block id=\"1\"><name>minecraft:stone</name>\
                   <displayName>Stone</displayName><blockDatas>\
                   <blockData><id>-4</id><image>/i.png</image></blockData>\
                   </blockDatas></block></blocks>";
        let err = read_block(Cursor::new(pack(xml))).unwrap_err();
        assert!(matches!(err, DataError::NegativeDataValue(-4)));
    }

    #[test]
    fn malformed_xml_is_an_error() {
        let err = read_block(Cursor::new(pack("<blocks><block"))).unwrap_err();
        assert!(matches!(err, DataError::Xml(_)));
    }

    #[test]
    fn bad_base64_is_an_error() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"!!! not base64 !!!").unwrap();
        let bytes = encoder.finish().unwrap();

        let err = read_block(Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, DataError::Base64(_)));
    }

    #[test]
    fn plain_bytes_are_not_gzip() {
        let err = read_block(Cursor::new(b"not gzip".to_vec())).unwrap_err();
        assert!(matches!(err, DataError::Io(_)));
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let block = sample_block();
        let path = dir.path().join(format!("{}.blk", block.file_stem()));

        write_block_file(&block, &path).unwrap();
        let read = read_block_file(&path).unwrap().unwrap();
        assert_eq!(read, block);
    }
}
