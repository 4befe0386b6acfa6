//! Integration tests covering buffers and views used together.
//!
//! These follow the way a host would drive the library: allocate a buffer, put several views on
//! top of it and observe the effects of writes across views.

use bytescope::{array_index, prelude::*};

/// Int32 elements over an 8 byte buffer.
#[test]
fn int32_view_over_buffer() -> Result<()> {
    let buffer = ByteBuffer::new(8);
    let view = TypedArrayView::from_buffer(ElementKind::Int32, &buffer, 0, None)?;

    assert_eq!(view.length(), 2);
    view.set(0, 1)?;
    view.set(1, -1)?;
    assert_eq!(view.get(0)?, 1.0);
    assert_eq!(view.get(1)?, -1.0);
    assert!(view.get(2).is_err());

    Ok(())
}

/// Big-endian store read back byte-wise and as little-endian.
#[test]
fn data_view_byte_order() -> Result<()> {
    let buffer = ByteBuffer::new(4);
    let view = BufferView::new(&buffer, 0, None)?;

    view.set_uint32(0, 0x0102_0304, false)?;
    assert_eq!(view.get_uint8(0, false)?, 0x01);
    assert_eq!(view.get_uint8(3, false)?, 0x04);
    assert_eq!(view.get_uint32(0, true)?, 0x0403_0201);
    assert_eq!(view.get_uint32(0, false)?, 0x0102_0304);
    assert_eq!(buffer.to_vec(), vec![0x01, 0x02, 0x03, 0x04]);

    Ok(())
}

/// Negative slice indices are moved past the end and clamp to the buffer length.
#[test]
fn slice_with_negative_begin() {
    let buffer = ByteBuffer::new(10);

    let slice = buffer.slice(-3, Some(10));
    assert_eq!(slice.byte_length(), 0);

    let slice = buffer.slice(0, Some(-3));
    assert_eq!(slice.byte_length(), 10);
}

#[test]
fn slice_copies_contents() -> Result<()> {
    let buffer = ByteBuffer::new(6);
    let bytes = TypedArrayView::from_buffer(ElementKind::Uint8, &buffer, 0, None)?;
    for (index, value) in [10, 11, 12, 13, 14, 15].into_iter().enumerate() {
        bytes.set(index, value)?;
    }

    let slice = buffer.slice(1, Some(4));
    assert_eq!(slice.to_vec(), vec![11, 12, 13]);

    // Writes to the original do not reach the copy
    bytes.set(1, 0)?;
    assert_eq!(slice.to_vec(), vec![11, 12, 13]);

    Ok(())
}

#[test]
fn overlapping_views_alias() -> Result<()> {
    let buffer = ByteBuffer::new(16);
    let doubles = TypedArrayView::from_buffer(ElementKind::Float64, &buffer, 8, Some(1))?;
    let words = TypedArrayView::from_buffer(ElementKind::Uint32, &buffer, 0, None)?;
    let data = BufferView::new(&buffer, 8, None)?;

    doubles.set(0, 1.0)?;
    let native = 1.0_f64.to_ne_bytes();
    let low = u32::from_ne_bytes([native[0], native[1], native[2], native[3]]);
    let high = u32::from_ne_bytes([native[4], native[5], native[6], native[7]]);
    assert_eq!(words.get(2)?, f64::from(low));
    assert_eq!(words.get(3)?, f64::from(high));

    data.set_float64(0, -2.5, cfg!(target_endian = "little"))?;
    assert_eq!(doubles.get(0)?, -2.5);

    words.set(3, 0)?;
    words.set(2, 0)?;
    assert_eq!(data.get_float64(0, true)?, 0.0);

    Ok(())
}

#[test]
fn views_outlive_local_buffer_handles() -> Result<()> {
    let (words, data) = {
        let buffer = ByteBuffer::new(4);
        (
            TypedArrayView::from_buffer(ElementKind::Uint16, &buffer, 0, None)?,
            BufferView::new(&buffer, 0, None)?,
        )
    };

    words.set(1, 0xFFFF)?;
    assert_eq!(data.get_uint16(2, false)?, 0xFFFF);
    assert!(words.buffer().same_buffer(data.buffer()));

    Ok(())
}

#[test]
fn copy_construction_between_kinds() -> Result<()> {
    let source = TypedArrayView::from_array_like(ElementKind::Float64, &[1.25, -3.75, 1e10])?;
    let ints = TypedArrayView::from_array_like(ElementKind::Int32, &source)?;
    let bytes = TypedArrayView::from_array_like(ElementKind::Uint8, &ints)?;

    // 1e10 wraps modulo 2^32
    assert_eq!(ints.to_vec()?, vec![1.0, -3.0, 1_410_065_408.0]);
    assert_eq!(bytes.to_vec()?, vec![1.0, 253.0, 0.0]);

    Ok(())
}

#[test]
fn dynamic_property_access() -> Result<()> {
    let view = TypedArrayView::with_length(ElementKind::Int16, 3)?;

    for key in ["0", "1", "2"] {
        let index = array_index(key).unwrap_or_default();
        assert!(view.put_property(key, index * 100)?);
    }
    assert_eq!(view.to_vec()?, vec![0.0, 100.0, 200.0]);

    assert_eq!(view.get_property("constructor")?, None);
    assert!(matches!(view.get_property("3"), Err(Error::Range { .. })));

    Ok(())
}

#[test]
fn limits_bound_implicit_allocations() {
    let limits = Limits::new().with_max_byte_length(64);

    assert!(TypedArrayView::with_length_in(ElementKind::Float64, 8, &limits).is_ok());
    assert!(TypedArrayView::with_length_in(ElementKind::Float64, 9, &limits).is_err());
    assert!(ByteBuffer::with_limits(65, &limits).is_err());

    // Explicit allocations are not limited
    assert_eq!(ByteBuffer::new(65).byte_length(), 65);
}

#[test]
fn errors_report_their_origin() {
    let buffer = ByteBuffer::new(2);
    let err = BufferView::new(&buffer, 0, Some(3)).unwrap_err();

    let Error::Range {
        message,
        file,
        line,
    } = &err;
    assert_eq!(message, "data view range out of bounds");
    assert!(file.ends_with(".rs"));
    assert!(*line > 0);
}
