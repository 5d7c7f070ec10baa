//! The data a CP72 form is composed from.

use serde::Deserialize;

use crate::goods::GoodsRow;

/// Everything printed on the form. All values are display strings and are drawn
/// verbatim; nothing here is parsed as a number.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormRecord {
    pub sender: String,
    pub sender_address: String,
    pub sender_phone: String,
    pub box_number: String,
    pub recipient: String,
    pub recipient_address: String,
    pub recipient_phone: String,
    /// Actual weight, kg
    pub weight: String,
    /// Parcel dimensions, cm
    pub length: String,
    pub width: String,
    pub height: String,
    pub volumetric_weight: String,
    /// The chargeable weight: the greater of actual and volumetric
    pub final_weight: String,
    /// Declared value, AUD
    pub value: String,
    pub delivery_option: String,
    pub goods: Vec<GoodsRow>,
}

/// A submitted form exactly as the web form posts it, goods as parallel arrays.
///
/// ```
/// # use cp72_pdf::InboundRecord;
/// let inbound: InboundRecord = serde_json::from_str(r#"{
///     "sender": " Bat-Erdene ",
///     "item_description": ["Books", ""],
///     "item_quantity": ["2", ""],
///     "item_weight": ["1.5", ""],
///     "item_origin": ["AU", ""],
///     "item_value": ["40", ""],
///     "sendCopy": "yes",
///     "customerEmail": "bat@example.com"
/// }"#).unwrap();
///
/// let parts = inbound.into_parts();
/// assert_eq!(parts.record.sender, "Bat-Erdene");
/// assert_eq!(parts.record.goods.len(), 1);
/// assert_eq!(parts.customer_copy.as_deref(), Some("bat@example.com"));
/// ```
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InboundRecord {
    pub sender: String,
    pub sender_address: String,
    pub sender_phone: String,
    pub box_number: String,
    pub recipient: String,
    pub recipient_address: String,
    pub recipient_phone: String,
    pub weight: String,
    pub length: String,
    pub width: String,
    pub height: String,
    pub volumetric_weight: String,
    pub final_weight: String,
    pub value: String,
    pub delivery_option: String,
    #[serde(rename = "item_description")]
    pub item_description: Vec<String>,
    #[serde(rename = "item_quantity")]
    pub item_quantity: Vec<String>,
    #[serde(rename = "item_weight")]
    pub item_weight: Vec<String>,
    #[serde(rename = "item_origin")]
    pub item_origin: Vec<String>,
    #[serde(rename = "item_value")]
    pub item_value: Vec<String>,
    pub send_copy: String,
    pub customer_email: String,
    pub signature_data: String,
}

/// An [InboundRecord] split into what the composer needs and what the mailer needs
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InboundParts {
    pub record: FormRecord,
    /// Address to copy the form to, if the customer asked for one
    pub customer_copy: Option<String>,
    /// The raw `data:` URL of the drawn signature, if any
    pub signature_data: Option<String>,
}

fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl InboundRecord {
    pub fn into_parts(self) -> InboundParts {
        let goods = GoodsRow::from_columns(
            &self.item_description,
            &self.item_quantity,
            &self.item_weight,
            &self.item_origin,
            &self.item_value,
        );

        let customer_copy = if self.send_copy.trim() == "yes" {
            non_empty(self.customer_email)
        } else {
            None
        };

        let record = FormRecord {
            sender: self.sender.trim().to_string(),
            sender_address: self.sender_address.trim().to_string(),
            sender_phone: self.sender_phone.trim().to_string(),
            box_number: self.box_number.trim().to_string(),
            recipient: self.recipient.trim().to_string(),
            recipient_address: self.recipient_address.trim().to_string(),
            recipient_phone: self.recipient_phone.trim().to_string(),
            weight: self.weight.trim().to_string(),
            length: self.length.trim().to_string(),
            width: self.width.trim().to_string(),
            height: self.height.trim().to_string(),
            volumetric_weight: self.volumetric_weight.trim().to_string(),
            final_weight: self.final_weight.trim().to_string(),
            value: self.value.trim().to_string(),
            delivery_option: self.delivery_option.trim().to_string(),
            goods,
        };

        InboundParts {
            record,
            customer_copy,
            signature_data: non_empty(self.signature_data),
        }
    }
}
