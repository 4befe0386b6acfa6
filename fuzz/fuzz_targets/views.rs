#![no_main]

use bytescope::{BufferView, ByteBuffer, ElementKind, TypedArrayView};
use libfuzzer_sys::fuzz_target;

const KINDS: [ElementKind; 8] = [
    ElementKind::Int8,
    ElementKind::Uint8,
    ElementKind::Int16,
    ElementKind::Uint16,
    ElementKind::Int32,
    ElementKind::Uint32,
    ElementKind::Float32,
    ElementKind::Float64,
];

fuzz_target!(|data: &[u8]| {
    let Some((&size, ops)) = data.split_first() else {
        return;
    };
    let buffer = ByteBuffer::new(usize::from(size));

    for op in ops.chunks_exact(4) {
        let kind = KINDS[usize::from(op[0] & 7)];
        let offset = usize::from(op[1]);
        let length = usize::from(op[2]);
        let value = f64::from(op[3] as i8) * 1.5;
        let little_endian = op[0] & 8 != 0;

        match op[0] >> 4 {
            0 => {
                if let Ok(view) = BufferView::new(&buffer, offset, Some(length)) {
                    let _ = view.set_kind(kind, usize::from(op[3]), value, little_endian);
                    let _ = view.get_kind(kind, usize::from(op[3]), little_endian);
                }
            }
            1 => {
                if let Ok(view) = TypedArrayView::from_buffer(kind, &buffer, offset, Some(length)) {
                    let _ = view.set(usize::from(op[3]), value);
                    let _ = view.to_vec();
                }
            }
            2 => {
                let slice = buffer.slice(i64::from(op[1] as i8), Some(i64::from(op[2] as i8)));
                assert!(slice.byte_length() <= buffer.byte_length());
            }
            _ => {
                if let Ok(source) = TypedArrayView::from_buffer(kind, &buffer, 0, None) {
                    let _ = TypedArrayView::from_array_like(KINDS[usize::from(op[3] & 7)], &source);
                }
            }
        }
    }
});
