//! # Scan Input
//!
//! The scanning collaborator (camera or image decoder) hands back a decoded
//! payload plus a free-form symbology name. This module maps that hint onto
//! the wallet's fixed [`BarcodeFormat`] enumeration and packages the pair
//! as a pre-fill for a card draft. The draft then goes through the same
//! upsert validation as manual input; an unrecognized hint defaults to
//! Code128, the most permissive format.

use crate::model::{BarcodeFormat, CardDraft};

/// A successful capture from the scanning collaborator.
#[derive(Debug, Clone)]
pub struct ScanCapture {
    pub decoded_text: String,
    pub format_hint: Option<String>,
}

impl ScanCapture {
    pub fn new(decoded_text: impl Into<String>, format_hint: Option<String>) -> Self {
        Self {
            decoded_text: decoded_text.into(),
            format_hint,
        }
    }

    /// The hint resolved onto the fixed format set.
    pub fn resolved_format(&self) -> BarcodeFormat {
        self.format_hint
            .as_deref()
            .map(format_from_hint)
            .unwrap_or_default()
    }

    /// A draft pre-filled with the capture, ready for the user to name.
    pub fn into_draft(self) -> CardDraft {
        CardDraft {
            barcode_format: self.resolved_format(),
            card_number: self.decoded_text,
            ..CardDraft::default()
        }
    }
}

/// Maps a scanner's symbology name onto [`BarcodeFormat`].
///
/// Hints are substring-matched case-insensitively against the names common
/// decoder libraries report (`QR_CODE`, `EAN_13`, `UPC_A`, ...). Anything
/// unrecognized falls back to Code128.
pub fn format_from_hint(hint: &str) -> BarcodeFormat {
    let hint = hint.to_uppercase();
    if hint.contains("QR") {
        BarcodeFormat::Qr
    } else if hint.contains("EAN_13") {
        BarcodeFormat::Ean13
    } else if hint.contains("EAN_8") {
        BarcodeFormat::Ean8
    } else if hint.contains("UPC_A") {
        BarcodeFormat::Upc
    } else if hint.contains("CODE_39") {
        BarcodeFormat::Code39
    } else if hint.contains("ITF") {
        BarcodeFormat::Itf
    } else {
        BarcodeFormat::Code128
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_hints_map_to_formats() {
        assert_eq!(format_from_hint("QR_CODE"), BarcodeFormat::Qr);
        assert_eq!(format_from_hint("EAN_13"), BarcodeFormat::Ean13);
        assert_eq!(format_from_hint("EAN_8"), BarcodeFormat::Ean8);
        assert_eq!(format_from_hint("UPC_A"), BarcodeFormat::Upc);
        assert_eq!(format_from_hint("CODE_39"), BarcodeFormat::Code39);
        assert_eq!(format_from_hint("ITF"), BarcodeFormat::Itf);
    }

    #[test]
    fn test_hints_are_case_insensitive() {
        assert_eq!(format_from_hint("qr_code"), BarcodeFormat::Qr);
        assert_eq!(format_from_hint("ean_13"), BarcodeFormat::Ean13);
    }

    #[test]
    fn test_unknown_hint_defaults_to_code128() {
        assert_eq!(format_from_hint("PDF_417"), BarcodeFormat::Code128);
        assert_eq!(format_from_hint(""), BarcodeFormat::Code128);
    }

    #[test]
    fn test_missing_hint_defaults_to_code128() {
        let capture = ScanCapture::new("12345", None);
        assert_eq!(capture.resolved_format(), BarcodeFormat::Code128);
    }

    #[test]
    fn test_capture_prefills_draft() {
        let capture = ScanCapture::new("4006381333931", Some("EAN_13".to_string()));
        let draft = capture.into_draft();
        assert_eq!(draft.card_number, "4006381333931");
        assert_eq!(draft.barcode_format, BarcodeFormat::Ean13);
        assert!(draft.id.is_none());
    }
}
