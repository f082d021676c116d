//! Minimal PDF 1.4 serializer for text-only pages
//!
//! Uses the standard Helvetica fonts with WinAnsiEncoding, so no font data
//! is embedded. Characters outside WinAnsi are written as `?`.

use super::layout::{Font, Page, PAGE_HEIGHT, PAGE_WIDTH};

const CATALOG_ID: usize = 1;
const PAGES_ID: usize = 2;
const FONT_REGULAR_ID: usize = 3;
const FONT_BOLD_ID: usize = 4;
const FIRST_PAGE_ID: usize = 5;

/// Map a character to its WinAnsiEncoding byte
pub fn win_ansi_byte(c: char) -> Option<u8> {
    let code = c as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => {
            let byte = match c {
                '€' => 0x80,
                '‚' => 0x82,
                'ƒ' => 0x83,
                '„' => 0x84,
                '…' => 0x85,
                '†' => 0x86,
                '‡' => 0x87,
                'ˆ' => 0x88,
                '‰' => 0x89,
                'Š' => 0x8A,
                '‹' => 0x8B,
                'Œ' => 0x8C,
                'Ž' => 0x8E,
                '‘' => 0x91,
                '’' => 0x92,
                '“' => 0x93,
                '”' => 0x94,
                '•' => 0x95,
                '–' => 0x96,
                '—' => 0x97,
                '˜' => 0x98,
                '™' => 0x99,
                'š' => 0x9A,
                '›' => 0x9B,
                'œ' => 0x9C,
                'ž' => 0x9E,
                'Ÿ' => 0x9F,
                _ => return None,
            };
            Some(byte)
        }
    }
}

/// Encode text as the body of a PDF literal string
fn encode_literal(text: &str, out: &mut Vec<u8>) {
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push(b'\\');
                out.push(c as u8);
            }
            _ => out.push(win_ansi_byte(c).unwrap_or(b'?')),
        }
    }
}

fn font_resource(font: Font) -> &'static str {
    match font {
        Font::Helvetica => "F1",
        Font::HelveticaBold => "F2",
    }
}

/// Content stream for one page
fn content_stream(page: &Page) -> Vec<u8> {
    let mut out = Vec::new();
    for run in &page.runs {
        out.extend_from_slice(
            format!(
                "BT /{} {} Tf {:.2} {:.2} Td (",
                font_resource(run.font),
                run.size,
                run.x,
                run.y
            )
            .as_bytes(),
        );
        encode_literal(&run.text, &mut out);
        out.extend_from_slice(b") Tj ET\n");
    }
    out
}

struct PdfBuffer {
    bytes: Vec<u8>,
    offsets: Vec<usize>,
}

impl PdfBuffer {
    fn object(&mut self, id: usize, body: &[u8]) {
        // Objects are written in id order, so offsets[id - 1] is this one
        debug_assert_eq!(self.offsets.len() + 1, id);
        self.offsets.push(self.bytes.len());
        self.bytes.extend_from_slice(format!("{} 0 obj\n", id).as_bytes());
        self.bytes.extend_from_slice(body);
        self.bytes.extend_from_slice(b"\nendobj\n");
    }
}

/// Serialize pages into a complete PDF document
pub fn write_pdf(pages: &[Page]) -> Vec<u8> {
    let mut pdf = PdfBuffer {
        bytes: b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n".to_vec(),
        offsets: Vec::new(),
    };

    pdf.object(
        CATALOG_ID,
        format!("<< /Type /Catalog /Pages {} 0 R >>", PAGES_ID).as_bytes(),
    );

    let kids: Vec<String> = (0..pages.len())
        .map(|i| format!("{} 0 R", FIRST_PAGE_ID + 2 * i))
        .collect();
    pdf.object(
        PAGES_ID,
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            pages.len()
        )
        .as_bytes(),
    );

    for (id, font) in [
        (FONT_REGULAR_ID, Font::Helvetica),
        (FONT_BOLD_ID, Font::HelveticaBold),
    ] {
        pdf.object(
            id,
            format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                font.base_font()
            )
            .as_bytes(),
        );
    }

    for (i, page) in pages.iter().enumerate() {
        let page_id = FIRST_PAGE_ID + 2 * i;
        let content_id = page_id + 1;
        pdf.object(
            page_id,
            format!(
                "<< /Type /Page /Parent {} 0 R /MediaBox [0 0 {:.2} {:.2}] \
                 /Resources << /Font << /F1 {} 0 R /F2 {} 0 R >> >> /Contents {} 0 R >>",
                PAGES_ID, PAGE_WIDTH, PAGE_HEIGHT, FONT_REGULAR_ID, FONT_BOLD_ID, content_id
            )
            .as_bytes(),
        );

        let content = content_stream(page);
        let mut body = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
        body.extend_from_slice(&content);
        body.extend_from_slice(b"\nendstream");
        pdf.object(content_id, &body);
    }

    let xref_offset = pdf.bytes.len();
    let size = pdf.offsets.len() + 1;
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", size);
    for offset in &pdf.offsets {
        xref.push_str(&format!("{:010} 00000 n \n", offset));
    }
    xref.push_str(&format!(
        "trailer\n<< /Size {} /Root {} 0 R >>\nstartxref\n{}\n%%EOF\n",
        size, CATALOG_ID, xref_offset
    ));
    pdf.bytes.extend_from_slice(xref.as_bytes());
    pdf.bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::pdf::layout::TextRun;

    fn page(texts: &[&str]) -> Page {
        Page {
            runs: texts
                .iter()
                .enumerate()
                .map(|(i, t)| TextRun {
                    font: Font::Helvetica,
                    size: 11.0,
                    x: 50.0,
                    y: 700.0 - 14.0 * i as f64,
                    text: t.to_string(),
                })
                .collect(),
        }
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn document_structure() {
        let bytes = write_pdf(&[page(&["Hello"])]);
        assert!(bytes.starts_with(b"%PDF-1.4\n"));
        assert!(bytes.ends_with(b"%%EOF\n"));
        assert!(contains(&bytes, b"/BaseFont /Helvetica-Bold"));
        assert!(contains(&bytes, b"/Count 1"));
        assert!(contains(&bytes, b"BT /F1 11 Tf 50.00 700.00 Td (Hello) Tj ET"));
        assert!(contains(&bytes, b"/MediaBox [0 0 595.28 841.89]"));
    }

    #[test]
    fn xref_offsets_point_at_objects() {
        let bytes = write_pdf(&[page(&["one"]), page(&["two"])]);
        let text = String::from_utf8_lossy(&bytes).to_string();
        let start: usize = text
            .rsplit("startxref\n")
            .next()
            .and_then(|s| s.lines().next())
            .and_then(|s| s.parse().ok())
            .unwrap();
        assert!(bytes[start..].starts_with(b"xref\n"));

        let xref = std::str::from_utf8(&bytes[start..]).unwrap();
        let entries: Vec<&str> = xref.lines().skip(3).take_while(|l| l.ends_with(" n ")).collect();
        // catalog, pages, 2 fonts, 2 x (page + content)
        assert_eq!(entries.len(), 8);
        for (i, entry) in entries.iter().enumerate() {
            let offset: usize = entry[..10].parse().unwrap();
            let expected = format!("{} 0 obj", i + 1);
            assert!(bytes[offset..].starts_with(expected.as_bytes()), "object {}", i + 1);
        }
    }

    #[test]
    fn stream_length_is_exact() {
        let bytes = write_pdf(&[page(&["a", "b"])]);
        let content = content_stream(&page(&["a", "b"]));
        let marker = format!("<< /Length {} >>\nstream\n", content.len());
        assert!(contains(&bytes, marker.as_bytes()));
        let mut framed = content.clone();
        framed.extend_from_slice(b"\nendstream");
        assert!(contains(&bytes, &framed));
    }

    #[test]
    fn literal_strings_are_escaped() {
        let mut out = Vec::new();
        encode_literal(r"Cost (net) \ tax", &mut out);
        assert_eq!(out, br"Cost \(net\) \\ tax".to_vec());
    }

    #[test]
    fn non_win_ansi_characters_become_question_marks() {
        let mut out = Vec::new();
        encode_literal("café – ₹ यह", &mut out);
        assert_eq!(out, vec![b'c', b'a', b'f', 0xE9, b' ', 0x96, b' ', b'?', b' ', b'?', b'?']);
    }
}
