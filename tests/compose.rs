use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::NaiveDate;
use cp72_pdf::layout::wrap_text;
use cp72_pdf::{
    Assets, Composer, DispatchError, Dispatcher, EmailMessage, FormRecord, GoodsRow,
    InboundRecord, Settings, SignatureAsset,
};
use image::{ImageOutputFormat, Rgba, RgbaImage};

fn contains(haystack: &[u8], needle: &str) -> bool {
    haystack
        .windows(needle.len())
        .any(|window| window == needle.as_bytes())
}

fn record(goods: usize) -> FormRecord {
    FormRecord {
        sender: "Bat-Erdene".to_string(),
        sender_address: "18 Example Street, Blacktown NSW 2148".to_string(),
        recipient: "Oyunaa".to_string(),
        recipient_address: "Ulaanbaatar 13380, Mongolia".to_string(),
        delivery_option: "Sea Freight".to_string(),
        goods: (1..=goods)
            .map(|i| GoodsRow {
                index: i,
                description: format!("Parcel item {i}"),
                quantity: "1".to_string(),
                weight: "0.5".to_string(),
                origin: "AU".to_string(),
                value: "10".to_string(),
            })
            .collect(),
        ..FormRecord::default()
    }
}

fn generate(record: &FormRecord, signature: Option<SignatureAsset>) -> Vec<u8> {
    Composer::new(Assets::builtin())
        .generate(record, signature)
        .expect("can generate form")
}

fn signature_url() -> String {
    let img = RgbaImage::from_pixel(120, 40, Rgba([0, 0, 80, 255]));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, ImageOutputFormat::Png).unwrap();
    format!("data:image/png;base64,{}", STANDARD.encode(out.into_inner()))
}

#[test]
fn three_goods_make_one_page() {
    let pdf = generate(&record(3), None);

    assert!(pdf.starts_with(b"%PDF-"));
    assert!(contains(&pdf, "/Count 1"));
    assert!(contains(&pdf, "(Page 1) Tj"));
    assert!(!contains(&pdf, "(Page 2) Tj"));
    assert!(contains(&pdf, "(Parcel item 3) Tj"));
    assert!(!contains(&pdf, "(-) Tj"));
    assert!(contains(&pdf, "(Selected Option: Sea Freight) Tj"));
}

#[test]
fn fifteen_goods_continue_on_page_two() {
    let pdf = generate(&record(15), None);

    assert!(contains(&pdf, "/Count 2"));
    assert!(contains(&pdf, "(Page 1) Tj"));
    assert!(contains(&pdf, "(Page 2) Tj"));
    assert!(contains(
        &pdf,
        "(CP72 CUSTOMS DECLARATION FORM \\(Continued\\)) Tj"
    ));
    assert!(contains(&pdf, "(13) Tj"));
    assert!(contains(&pdf, "(Parcel item 15) Tj"));
}

#[test]
fn page_count_follows_goods_count() {
    for (goods, pages) in [(0, 1), (1, 1), (12, 1), (13, 2), (30, 2)] {
        let pdf = generate(&record(goods), None);
        assert!(
            contains(&pdf, &format!("/Count {pages}")),
            "{goods} goods should make {pages} page(s)"
        );
    }
}

#[test]
fn no_goods_draws_dashes() {
    let pdf = generate(&record(0), None);
    assert!(contains(&pdf, "(-) Tj"));
}

#[test]
fn long_address_wraps_to_three_lines() {
    let address = "Flat 12, Building 7, Peace Avenue, Sukhbaatar District, Ulaanbaatar 14200, \
                   Mongolia. Deliver to the reception desk on the ground floor during office \
                   hours and call the recipient on arrival, thank you.";
    assert_eq!(address.chars().count(), 200);

    let lines = wrap_text(address, 95);
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|line| line.chars().count() <= 95));

    let pdf = generate(
        &FormRecord {
            recipient_address: address.to_string(),
            ..record(1)
        },
        None,
    );
    for line in lines {
        assert!(contains(&pdf, &format!("({line}) Tj")), "missing {line}");
    }
}

#[test]
fn mongolian_labels_fall_back_to_replacement_in_helvetica() {
    let pdf = generate(&record(1), None);
    assert!(contains(&pdf, "(Full Name / ???? ???: Bat-Erdene) Tj"));
    assert!(contains(&pdf, "/BaseFont /Helvetica-Bold"));
}

#[test]
fn document_info_is_written() {
    let pdf = generate(&record(1), None);
    assert!(contains(&pdf, "(CP72 Customs Declaration)"));
    assert!(contains(&pdf, "(Mon Freight)"));
}

#[test]
fn same_record_and_date_give_identical_bytes() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let composer = Composer::new(Assets::builtin()).with_date(date);
    let render = || {
        let signature = SignatureAsset::from_data_url(&signature_url());
        composer
            .generate(&record(15), signature)
            .expect("can generate form")
    };

    let first = render();
    let second = render();
    assert!(contains(&first, "/CreationDate (D:20240301)"));
    assert!(contains(&first, "(Date: 2024-03-01) Tj"));
    assert_eq!(first, second);
}

#[test]
fn signature_is_embedded() {
    let signature = SignatureAsset::from_data_url(&signature_url());
    assert!(signature.is_some());

    let pdf = generate(&record(1), signature);
    assert!(contains(&pdf, "/I0 Do"));
    assert!(contains(&pdf, "/SMask"));
}

#[test]
fn malformed_signature_still_generates() {
    let inbound = InboundRecord {
        sender: "Bat-Erdene".to_string(),
        signature_data: "data:image/png;base64,bm90IGFuIGltYWdl".to_string(),
        ..InboundRecord::default()
    };
    let parts = inbound.into_parts();
    let signature = parts
        .signature_data
        .as_deref()
        .and_then(SignatureAsset::from_data_url);
    assert!(signature.is_none());

    let pdf = generate(&parts.record, signature);
    assert!(pdf.starts_with(b"%PDF-"));
    assert!(!contains(&pdf, " Do\n"));
    assert!(contains(&pdf, "(Sender Signature:) Tj"));
}

#[test]
fn assets_are_shared_between_threads() {
    let composer = Composer::new(Assets::builtin());
    let handles: Vec<_> = (0..4)
        .map(|n| {
            let composer = composer.clone();
            std::thread::spawn(move || composer.generate(&record(n * 5), None))
        })
        .collect();

    for handle in handles {
        let pdf = handle.join().unwrap().unwrap();
        assert!(pdf.starts_with(b"%PDF-"));
    }
}

struct Refusing;

impl Dispatcher for Refusing {
    fn send(&self, _message: &EmailMessage) -> Result<(), DispatchError> {
        Err(DispatchError::Rejected("domain not verified".to_string()))
    }
}

#[test]
fn submission_survives_a_refused_email() {
    let inbound: InboundRecord = serde_json::from_str(
        r#"{
            "sender": "Bat-Erdene",
            "recipient": "Oyunaa",
            "item_description": ["Books", "", "Tea"],
            "item_quantity": ["2", "", "1"],
            "item_weight": ["1.5", "", "0.2"],
            "item_origin": ["AU", "", "CN"],
            "item_value": ["40", "", "12"],
            "sendCopy": "yes",
            "customerEmail": "bat@example.com"
        }"#,
    )
    .unwrap();

    let submission = cp72_pdf::submit(
        &Composer::new(Assets::builtin()),
        &Settings::default(),
        &Refusing,
        inbound.into_parts(),
    )
    .unwrap();

    assert!(!submission.email_sent);
    assert_eq!(
        submission.recipients,
        vec!["info@monfreight.com.au", "bat@example.com"]
    );
    assert!(contains(&submission.pdf, "(2) Tj"));
    assert!(contains(&submission.pdf, "(Tea) Tj"));
}
