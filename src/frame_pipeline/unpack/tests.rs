#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Arc;

    use parking_lot::Mutex;

    use crate::frame_pipeline::common::{FrameGeometry, KernelError, PropertyAccess, PropertyValue};
    use crate::frame_pipeline::kernel::{FrameKernel, SharedKernel};
    use crate::frame_pipeline::unpack::{unpack_frame, PackedUnpacker, SourceLayout, UnpackParams};

    fn plain_params() -> UnpackParams {
        UnpackParams::builder()
            .offset(0)
            .shift(8)
            .luma_mask(0xff)
            .chroma_mask(0xff)
            .build()
    }

    fn samples(output: &[u8], geometry: &FrameGeometry, row: usize) -> Vec<u16> {
        let start = row * geometry.stride_out;
        output[start..start + geometry.width * 2]
            .chunks_exact(2)
            .map(|b| u16::from_le_bytes([b[0], b[1]]))
            .collect()
    }

    /// Pack `(chroma, luma)` pairs into v210 words, three pairs per two words.
    fn pack_v210(pairs: &[(u32, u32)]) -> Vec<u8> {
        pairs
            .chunks(3)
            .flat_map(|group| {
                let get = |i: usize| group.get(i).copied().unwrap_or((0, 0));
                let (c0, l0) = get(0);
                let (c1, l1) = get(1);
                let (c2, l2) = get(2);
                let word0 = c0 | (l0 << 10) | (c1 << 20);
                let word1 = l1 | (c2 << 10) | (l2 << 20);
                [word0.to_le_bytes(), word1.to_le_bytes()].concat()
            })
            .collect()
    }

    fn unpack_one_row(layout: SourceLayout, row: &[u8], width: usize, params: &UnpackParams) -> Vec<u16> {
        let geometry = layout.geometry(width, 1);
        let mut input = vec![0u8; geometry.input_len()];
        input[..row.len()].copy_from_slice(row);
        let mut output = vec![0u8; geometry.output_len()];
        unpack_frame(layout, &geometry, params, &input, &mut output).unwrap();
        samples(&output, &geometry, 0)
    }

    #[test]
    fn test_interleaved_luma_lands_in_high_byte() {
        let out = unpack_one_row(SourceLayout::InterleavedByte, &[0x10, 0x20], 1, &plain_params());
        assert_eq!(out, vec![0x2010]);
    }

    #[test]
    fn test_interleaved_swap() {
        let params = UnpackParams { swap: true, ..plain_params() };
        let out = unpack_one_row(SourceLayout::InterleavedByte, &[0x10, 0x20], 1, &params);
        assert_eq!(out, vec![0x1020]);
    }

    #[test]
    fn test_default_offset_is_applied_before_masking() {
        let params = UnpackParams::default();
        let out = unpack_one_row(SourceLayout::InterleavedByte, &[0x50, 0x60, 0x10, 0x40], 2, &params);
        // 0x10 - 64 = -48, whose low byte is 0xd0
        assert_eq!(out, vec![0x2010, 0x00d0]);
    }

    #[test]
    fn test_v210_field_positions() {
        let pairs = [(1, 2), (3, 4), (5, 6)];
        let row = pack_v210(&pairs);

        let luma_only = UnpackParams::builder()
            .offset(0)
            .shift(0)
            .luma_mask(0x3ff)
            .chroma_mask(0)
            .build();
        let chroma_only = UnpackParams { luma_mask: 0, chroma_mask: 0x3ff, ..luma_only };

        assert_eq!(unpack_one_row(SourceLayout::TenBitPacked, &row, 3, &luma_only), vec![2, 4, 6]);
        assert_eq!(unpack_one_row(SourceLayout::TenBitPacked, &row, 3, &chroma_only), vec![1, 3, 5]);
    }

    #[test]
    fn test_v210_combines_like_interleaved() {
        let pairs = [(0x10, 0x20), (0x3ff, 0x001), (0x0ab, 0x0cd), (0x11, 0x22), (0x33, 0x44), (0x55, 0x66)];
        let out = unpack_one_row(SourceLayout::TenBitPacked, &pack_v210(&pairs), 6, &plain_params());
        assert_eq!(out, vec![0x2010, 0x01ff, 0xcdab, 0x2211, 0x4433, 0x6655]);
    }

    #[test]
    fn test_v210_truncates_partial_group() {
        let pairs = [(1, 0x10), (2, 0x20), (3, 0x30), (4, 0x40)];
        let geometry = SourceLayout::TenBitPacked.geometry(4, 1);
        let mut input = vec![0u8; geometry.input_len()];
        let packed = pack_v210(&pairs);
        input[..packed.len()].copy_from_slice(&packed);
        let mut output = vec![0xeeu8; geometry.output_len() + 2];

        unpack_frame(SourceLayout::TenBitPacked, &geometry, &plain_params(), &input, &mut output).unwrap();

        assert_eq!(samples(&output, &geometry, 0), vec![0x1001, 0x2002, 0x3003, 0x4004]);
        assert!(output[8..].iter().all(|&b| b == 0xee));
    }

    #[test]
    fn test_rows_follow_strides() {
        let geometry = SourceLayout::InterleavedByte.geometry(2, 3).with_strides(6, 6);
        let mut input = vec![0u8; geometry.input_len()];
        for row in 0..3u8 {
            let start = row as usize * 6;
            input[start..start + 4].copy_from_slice(&[row, 0x10 + row, row, 0x20 + row]);
        }
        let mut output = vec![0xeeu8; geometry.output_len()];

        unpack_frame(SourceLayout::InterleavedByte, &geometry, &plain_params(), &input, &mut output).unwrap();

        for row in 0..3u16 {
            assert_eq!(
                samples(&output, &geometry, row as usize),
                vec![((0x10 + row) << 8) | row, ((0x20 + row) << 8) | row]
            );
            let pad = row as usize * 6 + 4;
            assert_eq!(&output[pad..pad + 2], &[0xee, 0xee]);
        }
    }

    #[test]
    fn test_unknown_layout_tag() {
        let mut unpacker = PackedUnpacker::new();
        let geometry = SourceLayout::InterleavedByte.geometry(4, 4);
        let err = unpacker.set_format_tag("I420", geometry).unwrap_err();
        assert!(matches!(err, KernelError::UnknownLayout(_)));
        assert!(unpacker.layout().is_none());

        unpacker.set_format_tag("uyvy", geometry).unwrap();
        assert_eq!(unpacker.layout(), Some(SourceLayout::InterleavedByte));
    }

    #[test]
    fn test_unpack_before_format_fails() {
        let unpacker = PackedUnpacker::new();
        let mut output = vec![0u8; 8];
        let err = unpacker.transform(&[0u8; 8], &mut output).unwrap_err();
        assert!(matches!(err, KernelError::NotNegotiated));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_v210_stride_must_hold_every_group() {
        let mut unpacker = PackedUnpacker::new();
        let geometry = SourceLayout::TenBitPacked.geometry(7, 2).with_strides(16, 16);
        assert!(matches!(
            unpacker.set_format(SourceLayout::TenBitPacked, geometry),
            Err(KernelError::StrideTooSmall { stride: 16, required: 24 })
        ));
    }

    #[test]
    fn test_short_output_buffer_is_rejected() {
        let geometry = SourceLayout::InterleavedByte.geometry(4, 2);
        let input = vec![0u8; geometry.input_len()];
        let mut output = vec![0u8; geometry.output_len() - 1];
        let result = unpack_frame(SourceLayout::InterleavedByte, &geometry, &plain_params(), &input, &mut output);
        assert!(matches!(result, Err(KernelError::BufferTooSmall { .. })));
    }

    #[test]
    fn test_transform_frame_yields_gray16() {
        let geometry = SourceLayout::InterleavedByte.geometry(2, 1);
        let mut unpacker = PackedUnpacker::with_params(plain_params());
        unpacker.set_format(SourceLayout::InterleavedByte, geometry).unwrap();

        let mut input = vec![0u8; geometry.input_len()];
        input[..4].copy_from_slice(&[0x01, 0x02, 0x03, 0x04]);
        let frame = unpacker.transform_frame(&input).unwrap();

        assert_eq!(frame.to_gray16().unwrap(), vec![0x0201, 0x0403]);
    }

    #[test]
    fn test_properties_round_trip() {
        let mut unpacker = PackedUnpacker::new();
        unpacker.set_property("offset", PropertyValue::Int(-16)).unwrap();
        unpacker.set_property("shift", PropertyValue::UInt(4)).unwrap();
        unpacker.set_property("swap", PropertyValue::Bool(true)).unwrap();
        unpacker.set_property("luma-mask", PropertyValue::UInt(0x3ff)).unwrap();
        unpacker.set_property("chroma-mask", PropertyValue::UInt(0xf)).unwrap();

        assert_eq!(unpacker.property("offset").unwrap(), PropertyValue::Int(-16));
        assert_eq!(unpacker.property("swap").unwrap(), PropertyValue::Bool(true));
        assert_eq!(
            unpacker.params(),
            &UnpackParams {
                offset: -16,
                shift: 4,
                swap: true,
                luma_mask: 0x3ff,
                chroma_mask: 0xf,
            }
        );
    }

    #[test]
    fn test_property_ranges() {
        let mut unpacker = PackedUnpacker::new();
        for (name, value) in [
            ("offset", PropertyValue::Int(40_000)),
            ("shift", PropertyValue::UInt(16)),
            ("luma-mask", PropertyValue::UInt(0x1_0000)),
            ("chroma-mask", PropertyValue::Int(-1)),
            ("swap", PropertyValue::UInt(1)),
        ] {
            assert!(
                matches!(unpacker.set_property(name, value), Err(KernelError::InvalidProperty { .. })),
                "{name} accepted {value:?}"
            );
        }
        assert!(matches!(
            unpacker.set_property("gain", PropertyValue::UInt(1)),
            Err(KernelError::UnknownProperty(_))
        ));
        assert_eq!(unpacker.params(), &UnpackParams::default());
    }

    #[test]
    fn test_builder_clamps_shift() {
        assert_eq!(UnpackParams::builder().shift(40).build().shift, 15);
    }

    #[test]
    fn test_shared_unpacker_configure() {
        let geometry = SourceLayout::InterleavedByte.geometry(1, 1);
        let shared = SharedKernel::new(PackedUnpacker::with_params(plain_params()));
        shared
            .update(|unpacker| unpacker.set_format(SourceLayout::InterleavedByte, geometry))
            .unwrap();
        shared.set_property("swap", PropertyValue::Bool(true)).unwrap();

        let mut input = vec![0u8; geometry.input_len()];
        input[..2].copy_from_slice(&[0x10, 0x20]);
        let mut output = vec![0u8; geometry.output_len()];
        shared.transform(&input, &mut output).unwrap();

        assert_eq!(u16::from_le_bytes([output[0], output[1]]), 0x1020);
        assert!(shared.params().swap);
    }

    #[test]
    fn test_reset_forgets_format() {
        let mut unpacker = PackedUnpacker::with_params(plain_params());
        let geometry = SourceLayout::TenBitPacked.geometry(6, 1);
        unpacker.set_format(SourceLayout::TenBitPacked, geometry).unwrap();
        unpacker.reset();
        assert!(unpacker.layout().is_none());
        assert_eq!(unpacker.params(), &UnpackParams::default());
    }

    #[test]
    fn test_set_format_rejects_overflowing_geometry() {
        let mut unpacker = PackedUnpacker::new();
        let tall = SourceLayout::InterleavedByte
            .geometry(1, usize::MAX / 4 + 2)
            .with_strides(4, 4);
        let err = unpacker.set_format(SourceLayout::InterleavedByte, tall).unwrap_err();
        assert!(matches!(err, KernelError::InvalidDimensions(1, _)));
        assert!(err.is_configuration());
        assert!(unpacker.layout().is_none());

        let wide = SourceLayout::TenBitPacked.geometry(usize::MAX, 1);
        assert!(matches!(
            unpacker.set_format(SourceLayout::TenBitPacked, wide),
            Err(KernelError::InvalidDimensions(_, 1))
        ));

        let mut output = vec![0u8; 16];
        assert!(matches!(
            unpack_frame(SourceLayout::InterleavedByte, &tall, &plain_params(), &[0u8; 16], &mut output),
            Err(KernelError::InvalidDimensions(..))
        ));
        assert!(output.iter().all(|&b| b == 0));
    }

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_configure_logs_inside_kernel_span() {
        let log = CapturedLog::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer({
                let log = log.clone();
                move || log.clone()
            })
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut unpacker = PackedUnpacker::new()
                .with_span(tracing::info_span!("misb_unpack", element = "unpack0"));
            unpacker.configure(plain_params());
        });

        let text = String::from_utf8(log.0.lock().clone()).unwrap();
        let line = text
            .lines()
            .find(|line| line.contains("Parameters updated"))
            .expect("configure did not log");
        assert!(line.contains("misb_unpack"), "logged outside the kernel span: {line}");
        assert!(line.contains("unpack0"));
    }
}
