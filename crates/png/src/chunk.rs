//! PNG chunk framing.
//!
//! A chunk on disk is `length (u32 BE) | tag (4 bytes) | data | crc (u32 BE)`
//! where `length` counts only the data and `crc` is the CRC-32 of tag and data.

use std::io::Write;

use crate::error::{PngError, Result};

/// Four-byte chunk type code.
pub type ChunkTag = [u8; 4];

/// Image header.
pub const IHDR: ChunkTag = *b"IHDR";
/// Compressed image data.
pub const IDAT: ChunkTag = *b"IDAT";
/// End of image.
pub const IEND: ChunkTag = *b"IEND";

/// The 8-byte PNG file signature.
pub const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Largest chunk data length allowed by the format (2^31 - 1).
pub const MAX_CHUNK_LEN: usize = i32::MAX as usize;

/// CRC-32 of a chunk: covers the tag followed by the data, not the length.
pub fn chunk_crc(tag: &ChunkTag, data: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(tag);
    hasher.update(data);
    hasher.finalize()
}

/// Write one framed chunk.
pub fn write_chunk<W: Write>(writer: &mut W, tag: &ChunkTag, data: &[u8]) -> Result<()> {
    if data.len() > MAX_CHUNK_LEN {
        return Err(PngError::ChunkTooLarge(data.len()));
    }

    writer.write_all(&(data.len() as u32).to_be_bytes())?;
    writer.write_all(tag)?;
    writer.write_all(data)?;
    writer.write_all(&chunk_crc(tag, data).to_be_bytes())?;
    Ok(())
}

/// A chunk read back from an encoded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    pub tag: ChunkTag,
    pub data: &'a [u8],
    pub crc: u32,
}

/// Split an encoded PNG into its chunks, checking the framing.
///
/// The file must start with the signature, the first chunk must be `IHDR`,
/// the last must be `IEND`, and every stored CRC must match.
pub fn read_chunks(bytes: &[u8]) -> Result<Vec<Chunk<'_>>> {
    let mut rest = bytes
        .strip_prefix(&SIGNATURE[..])
        .ok_or_else(|| PngError::Malformed("missing PNG signature".to_string()))?;

    let mut chunks = Vec::new();
    while !rest.is_empty() {
        if rest.len() < 12 {
            return Err(PngError::Malformed("truncated chunk header".to_string()));
        }
        let len = u32::from_be_bytes([rest[0], rest[1], rest[2], rest[3]]) as usize;
        let tag: ChunkTag = [rest[4], rest[5], rest[6], rest[7]];
        if rest.len() < 12 + len {
            return Err(PngError::Malformed(format!(
                "chunk {} declares {len} bytes but only {} remain",
                String::from_utf8_lossy(&tag),
                rest.len() - 12
            )));
        }
        let data = &rest[8..8 + len];
        let crc_bytes = &rest[8 + len..12 + len];
        let crc = u32::from_be_bytes([crc_bytes[0], crc_bytes[1], crc_bytes[2], crc_bytes[3]]);
        if crc != chunk_crc(&tag, data) {
            return Err(PngError::Malformed(format!(
                "CRC mismatch in chunk {}",
                String::from_utf8_lossy(&tag)
            )));
        }

        chunks.push(Chunk { tag, data, crc });
        rest = &rest[12 + len..];
    }

    if chunks.first().map(|c| c.tag) != Some(IHDR) {
        return Err(PngError::Malformed("first chunk is not IHDR".to_string()));
    }
    if chunks.last().map(|c| c.tag) != Some(IEND) {
        return Err(PngError::Malformed("last chunk is not IEND".to_string()));
    }

    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_crc_known_values() {
        // Every valid PNG ends with this exact IEND chunk
        assert_eq!(chunk_crc(&IEND, &[]), 0xAE42_6082);
        // CRC covers tag + data as one stream
        assert_eq!(chunk_crc(b"abcd", b"efgh"), crc32fast::hash(b"abcdefgh"));
    }

    #[test]
    fn test_chunk_crc_excludes_length() {
        let data = [1u8, 2, 3];
        let mut framed = Vec::new();
        write_chunk(&mut framed, &IDAT, &data).unwrap();

        let stored = u32::from_be_bytes(framed[framed.len() - 4..].try_into().unwrap());
        assert_eq!(stored, crc32fast::hash(&framed[4..framed.len() - 4]));
        assert_ne!(stored, crc32fast::hash(&framed[..framed.len() - 4]));
    }

    #[test]
    fn test_write_chunk_layout() {
        let mut out = Vec::new();
        write_chunk(&mut out, &IHDR, &[0xAA, 0xBB]).unwrap();

        assert_eq!(out.len(), 4 + 4 + 2 + 4);
        assert_eq!(&out[..4], &[0, 0, 0, 2]);
        assert_eq!(&out[4..8], b"IHDR");
        assert_eq!(&out[8..10], &[0xAA, 0xBB]);
        assert_eq!(&out[10..], &chunk_crc(&IHDR, &[0xAA, 0xBB]).to_be_bytes());
    }

    #[test]
    fn test_empty_chunk() {
        let mut out = Vec::new();
        write_chunk(&mut out, &IEND, &[]).unwrap();
        assert_eq!(
            out,
            [0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82]
        );
    }

    fn framed(chunks: &[(ChunkTag, &[u8])]) -> Vec<u8> {
        let mut out = SIGNATURE.to_vec();
        for (tag, data) in chunks {
            write_chunk(&mut out, tag, data).unwrap();
        }
        out
    }

    #[test]
    fn test_read_chunks() {
        let bytes = framed(&[(IHDR, &[1; 13][..]), (IDAT, &[2, 3][..]), (IEND, &[][..])]);
        let chunks = read_chunks(&bytes).unwrap();
        let tags: Vec<ChunkTag> = chunks.iter().map(|c| c.tag).collect();
        assert_eq!(tags, vec![IHDR, IDAT, IEND]);
        assert_eq!(chunks[1].data, &[2, 3]);
    }

    #[test]
    fn test_read_chunks_rejects_bad_files() {
        // No signature
        let mut bytes = framed(&[(IHDR, &[0; 13][..]), (IEND, &[][..])]);
        assert!(read_chunks(&bytes[8..]).is_err());

        // Header missing
        assert!(read_chunks(&framed(&[(IDAT, &[0][..]), (IEND, &[][..])])).is_err());

        // Trailer missing
        assert!(read_chunks(&framed(&[(IHDR, &[0; 13][..])])).is_err());

        // Corrupted data byte
        bytes[8 + 8] ^= 0xFF;
        assert!(read_chunks(&bytes).is_err());

        // Truncated
        let bytes = framed(&[(IHDR, &[0; 13][..]), (IEND, &[][..])]);
        assert!(read_chunks(&bytes[..bytes.len() - 3]).is_err());
    }
}
