//! The wrapped transport form consumed by the QR encoder.

use base64::engine::{general_purpose::STANDARD, Engine};

/// Scheme, media type and codec preceding the payload, trailing comma included.
pub const DATA_URI_PREFIX: &str = "data:audio/ogg;codecs=opus;base64,";

/// Length of the padded standard base64 encoding of `raw_len` bytes.
pub fn encoded_len(raw_len: u64) -> u64 {
    raw_len.div_ceil(3) * 4
}

/// Length of the full data URI for `raw_len` bytes.
pub fn wrapped_len(raw_len: u64) -> u64 {
    encoded_len(raw_len) + DATA_URI_PREFIX.len() as u64
}

/// Standard alphabet, `=` padding.
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// `data:audio/ogg;codecs=opus;base64,<BASE64>`
pub fn data_uri(bytes: &[u8]) -> String {
    let mut uri = String::with_capacity(wrapped_len(bytes.len() as u64) as usize);
    uri.push_str(DATA_URI_PREFIX);
    STANDARD.encode_string(bytes, &mut uri);
    uri
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    #[test]
    fn test_prefix_length() {
        assert_eq!(DATA_URI_PREFIX.len(), 34);
        assert!(DATA_URI_PREFIX.ends_with(','));
    }

    #[test]
    fn test_encoded_len_small_values() {
        assert_eq!(encoded_len(0), 0);
        assert_eq!(encoded_len(1), 4);
        assert_eq!(encoded_len(2), 4);
        assert_eq!(encoded_len(3), 4);
        assert_eq!(encoded_len(4), 8);
        assert_eq!(encoded_len(6), 8);
        assert_eq!(encoded_len(7), 12);
    }

    #[test]
    fn test_encoded_len_matches_real_encoding() {
        let mut rng = rand::thread_rng();
        for n in 0..=300usize {
            let mut bytes = vec![0u8; n];
            rng.fill_bytes(&mut bytes);
            let encoded = encode(&bytes);
            assert_eq!(encoded.len() as u64, encoded_len(n as u64), "n = {}", n);
            assert!(encoded.len() >= n);
        }
    }

    #[test]
    fn test_wrapped_len_matches_real_uri() {
        let mut rng = rand::thread_rng();
        for n in [0usize, 1, 2, 3, 100, 1024, 5289, 5292] {
            let mut bytes = vec![0u8; n];
            rng.fill_bytes(&mut bytes);
            let uri = data_uri(&bytes);
            assert_eq!(uri.len() as u64, wrapped_len(n as u64));
            assert_eq!(wrapped_len(n as u64), encoded_len(n as u64) + 34);
        }
    }

    #[test]
    fn test_data_uri_form() {
        assert_eq!(
            data_uri(b"OggS"),
            "data:audio/ogg;codecs=opus;base64,T2dnUw=="
        );
        assert_eq!(data_uri(b""), DATA_URI_PREFIX);
    }
}
