//! Offer form carried by the step wizard.

use crate::{domain::wizard::WizardForm, usecases::contracts::RandomSource};

/// Used when the listing label carries no digits.
pub const FALLBACK_LIST_PRICE: u64 = 15_500_000;
/// Default offer amount when the listing label carries no digits.
pub const FALLBACK_OFFER_AMOUNT: &str = "5000000";
/// Offers below this fraction of the list price are flagged as low.
pub const LOW_OFFER_THRESHOLD: f64 = 0.95;

pub const OFFER_STEPS: [&str; 4] = [
    "Your Offer",
    "Payment Method",
    "Contact Details",
    "Review & Submit",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OfferPreset {
    pub label: &'static str,
    pub multiplier: f64,
}

pub const OFFER_PRESETS: [OfferPreset; 4] = [
    OfferPreset {
        label: "-10%",
        multiplier: 0.90,
    },
    OfferPreset {
        label: "-5%",
        multiplier: 0.95,
    },
    OfferPreset {
        label: "List Price",
        multiplier: 1.00,
    },
    OfferPreset {
        label: "+5%",
        multiplier: 1.05,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentMethod {
    #[default]
    Crypto,
    Bank,
    Mortgage,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [Self::Crypto, Self::Bank, Self::Mortgage];

    pub fn label(self) -> &'static str {
        match self {
            Self::Crypto => "Cryptocurrency",
            Self::Bank => "Bank Transfer",
            Self::Mortgage => "Mortgage/Financing",
        }
    }

    pub fn sublabel(self) -> &'static str {
        match self {
            Self::Crypto => "BTC, ETH, USDT & 50+ more",
            Self::Bank => "Direct wire transfer",
            Self::Mortgage => "We'll help arrange financing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreferredCrypto {
    #[default]
    Btc,
    Eth,
    Usdt,
}

impl PreferredCrypto {
    pub const ALL: [PreferredCrypto; 3] = [Self::Btc, Self::Eth, Self::Usdt];

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Btc => "BTC",
            Self::Eth => "ETH",
            Self::Usdt => "USDT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Financing {
    #[default]
    Cash,
}

impl Financing {
    pub fn label(self) -> &'static str {
        match self {
            Self::Cash => "Cash",
        }
    }
}

/// Free-text fields the user can type into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferField {
    OfferAmount,
    Name,
    Email,
    Phone,
    MoveInDate,
    Message,
}

impl OfferField {
    pub fn label(self) -> &'static str {
        match self {
            Self::OfferAmount => "Offer Amount (AED)",
            Self::Name => "Full Name",
            Self::Email => "Email Address",
            Self::Phone => "Phone Number",
            Self::MoveInDate => "Preferred Move-in Date",
            Self::Message => "Additional Message",
        }
    }

    /// Editable text fields shown on each step.
    pub fn for_step(step: usize) -> &'static [OfferField] {
        match step {
            0 => &[Self::OfferAmount],
            2 => &[Self::Name, Self::Email, Self::Phone, Self::MoveInDate],
            3 => &[Self::Message],
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferFields {
    /// Digits only.
    pub offer_amount: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub payment_method: PaymentMethod,
    pub preferred_crypto: PreferredCrypto,
    pub move_in_date: String,
    pub financing: Financing,
}

impl OfferFields {
    pub fn for_listing(listing_price: &str) -> Self {
        let digits = sanitize_amount(listing_price);
        let offer_amount = if digits.is_empty() {
            FALLBACK_OFFER_AMOUNT.to_owned()
        } else {
            digits
        };

        Self {
            offer_amount,
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            message: String::new(),
            payment_method: PaymentMethod::default(),
            preferred_crypto: PreferredCrypto::default(),
            move_in_date: String::new(),
            financing: Financing::default(),
        }
    }

    pub fn get(&self, field: OfferField) -> &str {
        match field {
            OfferField::OfferAmount => &self.offer_amount,
            OfferField::Name => &self.name,
            OfferField::Email => &self.email,
            OfferField::Phone => &self.phone,
            OfferField::MoveInDate => &self.move_in_date,
            OfferField::Message => &self.message,
        }
    }

    /// Stores `value`, stripping non-digits for the amount field.
    pub fn set(&mut self, field: OfferField, value: &str) {
        match field {
            OfferField::OfferAmount => self.offer_amount = sanitize_amount(value),
            OfferField::Name => self.name = value.to_owned(),
            OfferField::Email => self.email = value.to_owned(),
            OfferField::Phone => self.phone = value.to_owned(),
            OfferField::MoveInDate => self.move_in_date = value.to_owned(),
            OfferField::Message => self.message = value.to_owned(),
        }
    }

    /// Parsed amount; an empty field counts as zero and digits beyond the
    /// `u64` range saturate.
    pub fn amount(&self) -> u64 {
        match self.offer_amount.parse() {
            Ok(amount) => amount,
            Err(_) if self.offer_amount.is_empty() => 0,
            Err(_) => u64::MAX,
        }
    }
}

impl WizardForm for OfferFields {
    fn missing_required(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

pub fn sanitize_amount(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}

/// List price in whole AED parsed from a display label like "AED 15,500,000".
pub fn list_price(listing_price: &str) -> u64 {
    sanitize_amount(listing_price)
        .parse()
        .unwrap_or(FALLBACK_LIST_PRICE)
}

pub fn preset_amount(list_price: u64, multiplier: f64) -> u64 {
    (list_price as f64 * multiplier).round() as u64
}

pub fn is_offer_low(amount: u64, list_price: u64) -> bool {
    (amount as f64) < list_price as f64 * LOW_OFFER_THRESHOLD
}

/// Groups digits with commas: 13950000 -> "13,950,000".
pub fn format_amount(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

const REFERENCE_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Submission reference such as `CH-4K9Q2ZJD`.
pub fn reference_code(rng: &mut dyn RandomSource) -> String {
    let suffix: String = (0..8)
        .map(|_| REFERENCE_ALPHABET[rng.pick(REFERENCE_ALPHABET.len())] as char)
        .collect();
    format!("CH-{suffix}")
}
