// Decoding of compressed trace files

use crate::core::constants::TraceEncoding;
use crate::core::error::{Result, TwinError};
use flate2::read::GzDecoder;
use std::io::Read;

pub fn decompress(data: &[u8], encoding: TraceEncoding) -> Result<Vec<u8>> {
    match encoding {
        TraceEncoding::Plain => Ok(data.to_vec()),

        TraceEncoding::Gzip => {
            let mut decoder = GzDecoder::new(data);
            let mut decompressed = Vec::new();
            decoder
                .read_to_end(&mut decompressed)
                .map_err(|e| TwinError::DecompressionFailed(format!("Gzip: {}", e)))?;
            Ok(decompressed)
        }

        #[cfg(feature = "zstd")]
        TraceEncoding::Zstd => zstd::decode_all(data)
            .map_err(|e| TwinError::DecompressionFailed(format!("Zstd: {}", e))),

        #[cfg(not(feature = "zstd"))]
        TraceEncoding::Zstd => Err(TwinError::UnsupportedCompression("zstd")),
    }
}

/// Detects the encoding from magic bytes and returns plain trace bytes.
pub fn decode_trace(data: &[u8]) -> Result<Vec<u8>> {
    decompress(data, TraceEncoding::detect(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decompress_plain() {
        let data = b"time_s,power_w\n0,1\n";
        let result = decode_trace(data).unwrap();
        assert_eq!(result, data);
    }

    #[test]
    fn test_decompress_gzip() {
        use flate2::write::GzEncoder;
        use flate2::Compression;
        use std::io::Write;

        let original = b"time_s,power_w\n0.0,80\n0.01,95\n";
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(original).unwrap();
        let compressed = encoder.finish().unwrap();

        assert_eq!(TraceEncoding::detect(&compressed), TraceEncoding::Gzip);
        let decompressed = decode_trace(&compressed).unwrap();
        assert_eq!(decompressed, original);
    }

    #[test]
    fn test_truncated_gzip_fails() {
        let data = [0x1f, 0x8b, 0x08];
        let err = decode_trace(&data).unwrap_err();
        assert!(matches!(err, TwinError::DecompressionFailed(_)));
    }

    #[cfg(feature = "zstd")]
    #[test]
    fn test_decompress_zstd() {
        let original = b"time_s,power_w\n0.0,80\n";
        let compressed = zstd::encode_all(&original[..], 0).unwrap();

        assert_eq!(TraceEncoding::detect(&compressed), TraceEncoding::Zstd);
        assert_eq!(decode_trace(&compressed).unwrap(), original);
    }
}
