use std::fmt;

use uuid::Uuid;

/// Opaque record identifier, assigned once when a transaction is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransactionId(Uuid);

impl TransactionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnType {
    Income,
    Expense,
}

impl TxnType {
    pub const ALL: &'static [TxnType] = &[TxnType::Income, TxnType::Expense];

    pub fn as_str(&self) -> &'static str {
        match self {
            TxnType::Income => "Income",
            TxnType::Expense => "Expense",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Brand {
    Nike,
    Adidas,
    Puma,
}

impl Brand {
    pub const ALL: &'static [Brand] = &[Brand::Nike, Brand::Adidas, Brand::Puma];

    pub fn as_str(&self) -> &'static str {
        match self {
            Brand::Nike => "Nike",
            Brand::Adidas => "Adidas",
            Brand::Puma => "Puma",
        }
    }
}

/// In-progress form contents. Every field may be empty; nothing here is validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub date: String,
    pub amount: String,
    pub kind: Option<TxnType>,
    pub brand: Option<Brand>,
}

impl Draft {
    pub fn new(date: &str, amount: &str, kind: TxnType, brand: Brand) -> Self {
        Self {
            date: date.to_string(),
            amount: amount.to_string(),
            kind: Some(kind),
            brand: Some(brand),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Draft::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub id: TransactionId,
    pub date: String,
    pub amount: String,
    pub kind: Option<TxnType>,
    pub brand: Option<Brand>,
}

impl Transaction {
    pub fn from_draft(id: TransactionId, draft: Draft) -> Self {
        Self {
            id,
            date: draft.date,
            amount: draft.amount,
            kind: draft.kind,
            brand: draft.brand,
        }
    }

    pub fn to_draft(&self) -> Draft {
        Draft {
            date: self.date.clone(),
            amount: self.amount.clone(),
            kind: self.kind,
            brand: self.brand,
        }
    }

    /// Numeric amount, when the stored text parses as one.
    pub fn amount_value(&self) -> Option<f64> {
        self.amount.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }

    pub fn kind_label(&self) -> &'static str {
        self.kind.map(|k| k.as_str()).unwrap_or("")
    }

    pub fn brand_label(&self) -> &'static str {
        self.brand.map(|b| b.as_str()).unwrap_or("")
    }
}
