use pretty_assertions::assert_eq;
use webpdf_backend::{descriptor_filename, pdf_filename};

#[test]
fn filename_is_deterministic_and_host_based() {
    let first = pdf_filename("https://example.com/article");
    let second = pdf_filename("https://example.com/article");
    assert_eq!(first, second);
    assert!(first.starts_with("example.com--"));
    assert!(first.ends_with(".pdf"));
}

#[test]
fn different_urls_on_one_host_get_different_names() {
    let a = pdf_filename("https://example.com/a");
    let b = pdf_filename("https://example.com/b");
    assert_ne!(a, b);
}

#[test]
fn unparseable_url_falls_back_to_a_generic_name() {
    let name = pdf_filename("not a url");
    assert!(name.starts_with("webpage--"));
    assert!(name.ends_with(".pdf"));
}

#[test]
fn descriptor_filename_keeps_only_the_final_segment() {
    assert_eq!(descriptor_filename("out.pdf"), "out.pdf");
    assert_eq!(descriptor_filename("../../etc/passwd"), "passwd.pdf");
    assert_eq!(descriptor_filename("dir\\nested\\doc.pdf"), "doc.pdf");
}

#[test]
fn descriptor_filename_always_has_the_pdf_extension() {
    assert_eq!(descriptor_filename("report"), "report.pdf");
}

#[test]
fn long_multibyte_descriptor_names_are_truncated_safely() {
    let name = descriptor_filename(&"あ".repeat(40));
    assert!(name.ends_with(".pdf"));
    // 80-byte cap on the stem, never split inside a character.
    assert!(name.len() <= 84);
}
