use exitrank_png::{
    chunk_crc, encode, encode_into, read_chunks, write_png, EncodeOptions, GeometryError,
    PixelBuffer, PngError, IDAT, IEND, IHDR, SIGNATURE,
};
use flate2::read::ZlibDecoder;
use std::io::Read;
use tempfile::tempdir;

fn be_u32(bytes: &[u8]) -> u32 {
    u32::from_be_bytes(bytes.try_into().unwrap())
}

#[test]
fn test_one_black_pixel() {
    let png = encode(1, 1, &[[0u8, 0, 0]]).unwrap();

    assert_eq!(&png[..8], &SIGNATURE);

    // IHDR: length 13, then width, height, depth, color type, methods
    assert_eq!(be_u32(&png[8..12]), 13);
    assert_eq!(&png[12..16], b"IHDR");
    assert_eq!(be_u32(&png[16..20]), 1);
    assert_eq!(be_u32(&png[20..24]), 1);
    assert_eq!(png[24], 8);
    assert_eq!(png[25], 2);
    assert_eq!(&png[26..29], &[0, 0, 0]);

    let chunks = read_chunks(&png).unwrap();
    assert_eq!(chunks.len(), 3);
    for chunk in &chunks {
        assert_eq!(chunk.crc, chunk_crc(&chunk.tag, chunk.data));
    }
    assert!(chunks[2].data.is_empty());
}

#[test]
fn test_every_chunk_trailer_is_crc_of_tag_and_data() {
    let png = encode(3, 2, &[[9u8; 9], [4u8; 9]]).unwrap();

    let mut rest = &png[8..];
    let mut tags = Vec::new();
    while !rest.is_empty() {
        let len = be_u32(&rest[..4]) as usize;
        let tag_and_data = &rest[4..8 + len];
        let stored = be_u32(&rest[8 + len..12 + len]);
        assert_eq!(stored, crc32fast::hash(tag_and_data));
        tags.push(rest[4..8].to_vec());
        rest = &rest[12 + len..];
    }

    assert_eq!(tags, vec![IHDR.to_vec(), IDAT.to_vec(), IEND.to_vec()]);
}

#[test]
fn test_header_advertises_dimensions() {
    let buffer = PixelBuffer::filled(1200, 7, [250, 250, 250]).unwrap();
    let png = buffer.to_png().unwrap();

    let chunks = read_chunks(&png).unwrap();
    assert_eq!(chunks[0].tag, IHDR);
    assert_eq!(be_u32(&chunks[0].data[..4]), 1200);
    assert_eq!(be_u32(&chunks[0].data[4..8]), 7);
}

#[test]
fn test_idat_decompresses_to_filtered_scanlines() {
    let mut buffer = PixelBuffer::filled(2, 3, [1, 1, 1]).unwrap();
    buffer.put_pixel(1, 2, [67, 97, 238]);
    let png = buffer.to_png().unwrap();

    let chunks = read_chunks(&png).unwrap();
    let idat = chunks.iter().find(|c| c.tag == IDAT).unwrap();
    let mut raw = Vec::new();
    ZlibDecoder::new(idat.data).read_to_end(&mut raw).unwrap();

    let mut expected = Vec::new();
    for line in buffer.scanlines() {
        expected.push(0);
        expected.extend_from_slice(line);
    }
    assert_eq!(raw, expected);
    assert_eq!(raw.len(), 3 * (1 + 2 * 3));
}

#[test]
fn test_encoding_is_deterministic() {
    let rows: Vec<Vec<u8>> = (0..16u8)
        .map(|y| (0..48u8).map(|x| x.wrapping_mul(y)).collect())
        .collect();

    let first = encode(16, 16, &rows).unwrap();
    let second = encode(16, 16, &rows).unwrap();
    assert_eq!(first, second);

    let buffer = PixelBuffer::from_scanlines(16, &rows).unwrap();
    assert_eq!(buffer.to_png().unwrap(), first);
}

#[test]
fn test_short_scanline_writes_nothing() {
    let rows = [vec![0u8; 6], vec![0u8; 4]];
    let mut out = Vec::new();

    let err = encode_into(&mut out, 2, 2, &rows, EncodeOptions::default()).unwrap_err();

    assert!(matches!(
        err,
        PngError::InvalidGeometry(GeometryError::ScanlineLength {
            row: 1,
            expected: 6,
            actual: 4
        })
    ));
    assert!(out.is_empty());
}

#[test]
fn test_zero_dimension_writes_nothing() {
    let rows: Vec<Vec<u8>> = Vec::new();
    let mut out = Vec::new();

    let err = encode_into(&mut out, 0, 0, &rows, EncodeOptions::default()).unwrap_err();

    assert!(matches!(err, PngError::InvalidGeometry(_)));
    assert!(out.is_empty());
}

#[test]
fn test_write_png_creates_parent_directories() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("outputs").join("chart.png");
    let buffer = PixelBuffer::filled(5, 5, [0, 0, 0]).unwrap();

    write_png(&path, &buffer).unwrap();

    let written = std::fs::read(&path).unwrap();
    assert_eq!(written, buffer.to_png().unwrap());
}
