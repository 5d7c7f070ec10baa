//! Renders a CP72 form from a JSON rendition of the web form.
//!
//! ```sh
//! cargo run --example cp72 -- demos/sample.json cp72.pdf
//! ```
//!
//! Set `CP72_FONTS_DIR` to a directory holding NotoSans to get the Mongolian labels
//! drawn properly; the built-in Helvetica can only draw Latin-1.

use cp72_pdf::{Assets, Composer, InboundRecord, Settings, SignatureAsset};
use std::fs::File;
use std::io::Write;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let input = args.next().unwrap_or_else(|| "demos/sample.json".to_string());
    let output = args.next().unwrap_or_else(|| "cp72.pdf".to_string());

    let settings = Settings::from_env().expect("valid settings");
    let assets = Assets::load(&settings).expect("can load assets");

    let json = std::fs::read_to_string(&input).expect("can read input");
    let inbound: InboundRecord = serde_json::from_str(&json).expect("valid form JSON");
    let parts = inbound.into_parts();

    let signature = parts
        .signature_data
        .as_deref()
        .and_then(SignatureAsset::from_data_url);

    let pdf = Composer::new(assets)
        .generate(&parts.record, signature)
        .expect("can compose form");

    let mut out = File::create(&output).expect("can create output file");
    out.write_all(&pdf).expect("can write pdf");
    println!("wrote {} bytes to {output}", pdf.len());
}
