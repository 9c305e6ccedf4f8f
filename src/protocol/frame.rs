/// UART-style frame decoding and parity validation
use crate::error::FrameError;

// Frame layout constants
const START_MARKER: u8 = b'#';
const STOP_MARKER: u8 = b'&';
const MIN_FRAME_LEN: usize = 3; // start + parity + stop, empty body

/// A structurally valid frame whose parity has been checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    pub body: &'a str,
    pub parity: char,
}

/// Check the even-parity digit of a frame body
///
/// Sums every decimal digit in `body` (signs, decimal points and letters are
/// skipped) plus the parity digit. The frame is valid when the total is even.
/// A parity character that is not a single decimal digit always fails.
pub fn is_even_parity(body: &str, parity: char) -> bool {
    let parity_value = match parity.to_digit(10) {
        Some(value) => value,
        None => return false,
    };

    let body_sum: u32 = body.chars().filter_map(|c| c.to_digit(10)).sum();

    (body_sum + parity_value) % 2 == 0
}

/// Decode a raw payload of the form `#` + body + parity + `&`
///
/// # Returns
/// The frame on success, `BadFraming` when markers are missing or the payload
/// is too short, `BadParity` when the parity digit does not validate the body.
pub fn decode_frame(raw: &[u8]) -> Result<Frame<'_>, FrameError> {
    if raw.len() < MIN_FRAME_LEN || raw[0] != START_MARKER || raw[raw.len() - 1] != STOP_MARKER {
        return Err(FrameError::BadFraming);
    }

    let parity_byte = raw[raw.len() - 2];
    if !parity_byte.is_ascii() {
        // A multi-byte character cannot be a parity digit
        return Err(FrameError::BadParity);
    }
    let parity = char::from(parity_byte);

    let body = std::str::from_utf8(&raw[1..raw.len() - 2]).map_err(|_| FrameError::BadFraming)?;

    if !is_even_parity(body, parity) {
        return Err(FrameError::BadParity);
    }

    Ok(Frame { body, parity })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parity_sums_digits_with_parity_digit() {
        assert!(is_even_parity("123", '0'));
        assert!(!is_even_parity("123", '1'));
        assert!(is_even_parity("", '0'));
        assert!(!is_even_parity("", '1'));
    }

    #[test]
    fn parity_ignores_sign_and_decimal_point() {
        // 2 + 1 + 5 = 8
        assert!(is_even_parity("-21.5", '0'));
        assert!(is_even_parity("21.50", '0'));
        assert!(!is_even_parity("-21.5", '3'));
    }

    #[test]
    fn parity_rejects_non_digit_parity() {
        assert!(!is_even_parity("12", 'a'));
        assert!(!is_even_parity("12", '&'));
        assert!(!is_even_parity("12", '٢')); // non-ASCII digit
    }

    #[test]
    fn decodes_valid_frames() {
        let frame = decode_frame(b"#T0&").unwrap();
        assert_eq!(frame.body, "T");
        assert_eq!(frame.parity, '0');

        let frame = decode_frame(b"#51&").unwrap();
        assert_eq!(frame.body, "5");

        let frame = decode_frame(b"#0&").unwrap();
        assert_eq!(frame.body, "");
    }

    #[test]
    fn rejects_bad_parity() {
        assert_eq!(decode_frame(b"#50&"), Err(FrameError::BadParity));
        assert_eq!(decode_frame(b"#T1&"), Err(FrameError::BadParity));
        assert_eq!(decode_frame(b"#Tx&"), Err(FrameError::BadParity));
    }

    #[test]
    fn rejects_bad_framing() {
        assert_eq!(decode_frame(b"#T0"), Err(FrameError::BadFraming));
        assert_eq!(decode_frame(b"T0&"), Err(FrameError::BadFraming));
        assert_eq!(decode_frame(b"$T0&"), Err(FrameError::BadFraming));
        assert_eq!(decode_frame(b"#&"), Err(FrameError::BadFraming));
        assert_eq!(decode_frame(b""), Err(FrameError::BadFraming));
        assert_eq!(decode_frame(&[b'#', 0xff, b'0', b'&']), Err(FrameError::BadFraming));
    }
}
