//! Tax head ledger models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Statutory tax head under which demand components are tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaxHead {
    Igst,
    Cgst,
    Sgst,
    Cess,
}

impl TaxHead {
    /// All heads in ledger order.
    pub const ALL: [TaxHead; 4] = [TaxHead::Igst, TaxHead::Cgst, TaxHead::Sgst, TaxHead::Cess];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaxHead::Igst => "IGST",
            TaxHead::Cgst => "CGST",
            TaxHead::Sgst => "SGST",
            TaxHead::Cess => "CESS",
        }
    }

    pub fn parse(value: &str) -> Option<TaxHead> {
        match value.trim().to_ascii_uppercase().as_str() {
            "IGST" => Some(TaxHead::Igst),
            "CGST" => Some(TaxHead::Cgst),
            "SGST" => Some(TaxHead::Sgst),
            "CESS" => Some(TaxHead::Cess),
            _ => None,
        }
    }
}

/// One of the five amounts tracked under every head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaxComponent {
    Tax,
    Interest,
    Penalty,
    LateFee,
    Others,
}

impl TaxComponent {
    pub const ALL: [TaxComponent; 5] = [
        TaxComponent::Tax,
        TaxComponent::Interest,
        TaxComponent::Penalty,
        TaxComponent::LateFee,
        TaxComponent::Others,
    ];
}

/// Amounts for a single head, in the smallest currency unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxHeadValues {
    #[serde(default)]
    pub tax: Decimal,
    #[serde(default)]
    pub interest: Decimal,
    #[serde(default)]
    pub penalty: Decimal,
    #[serde(default)]
    pub late_fee: Decimal,
    #[serde(default)]
    pub others: Decimal,
}

impl TaxHeadValues {
    pub fn new(
        tax: Decimal,
        interest: Decimal,
        penalty: Decimal,
        late_fee: Decimal,
        others: Decimal,
    ) -> Self {
        Self {
            tax,
            interest,
            penalty,
            late_fee,
            others,
        }
    }

    /// Builds head values from optional inputs; absent or negative amounts become zero.
    pub fn from_optional(
        tax: Option<Decimal>,
        interest: Option<Decimal>,
        penalty: Option<Decimal>,
        late_fee: Option<Decimal>,
        others: Option<Decimal>,
    ) -> Self {
        Self {
            tax: clamp_amount(tax),
            interest: clamp_amount(interest),
            penalty: clamp_amount(penalty),
            late_fee: clamp_amount(late_fee),
            others: clamp_amount(others),
        }
    }

    /// Returns a copy with every negative component clamped to zero.
    pub fn sanitized(&self) -> Self {
        Self::from_optional(
            Some(self.tax),
            Some(self.interest),
            Some(self.penalty),
            Some(self.late_fee),
            Some(self.others),
        )
    }

    pub fn component(&self, component: TaxComponent) -> Decimal {
        match component {
            TaxComponent::Tax => self.tax,
            TaxComponent::Interest => self.interest,
            TaxComponent::Penalty => self.penalty,
            TaxComponent::LateFee => self.late_fee,
            TaxComponent::Others => self.others,
        }
    }

    /// Sum of all five components.
    pub fn total(&self) -> Decimal {
        self.tax + self.interest + self.penalty + self.late_fee + self.others
    }
}

/// Monetary breakdown across the four statutory heads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxHeadLedger {
    #[serde(default)]
    pub igst: TaxHeadValues,
    #[serde(default)]
    pub cgst: TaxHeadValues,
    #[serde(default)]
    pub sgst: TaxHeadValues,
    #[serde(default)]
    pub cess: TaxHeadValues,
}

impl TaxHeadLedger {
    pub fn head(&self, head: TaxHead) -> &TaxHeadValues {
        match head {
            TaxHead::Igst => &self.igst,
            TaxHead::Cgst => &self.cgst,
            TaxHead::Sgst => &self.sgst,
            TaxHead::Cess => &self.cess,
        }
    }

    pub fn head_mut(&mut self, head: TaxHead) -> &mut TaxHeadValues {
        match head {
            TaxHead::Igst => &mut self.igst,
            TaxHead::Cgst => &mut self.cgst,
            TaxHead::Sgst => &mut self.sgst,
            TaxHead::Cess => &mut self.cess,
        }
    }

    /// Iterates heads in ledger order.
    pub fn heads(&self) -> impl Iterator<Item = (TaxHead, &TaxHeadValues)> {
        TaxHead::ALL.into_iter().map(move |head| (head, self.head(head)))
    }

    /// Sum of one component across all heads.
    pub fn component_total(&self, component: TaxComponent) -> Decimal {
        self.heads().map(|(_, values)| values.component(component)).sum()
    }

    /// Sum of every component across every head.
    pub fn grand_total(&self) -> Decimal {
        self.heads().map(|(_, values)| values.total()).sum()
    }

    pub fn sanitized(&self) -> Self {
        Self {
            igst: self.igst.sanitized(),
            cgst: self.cgst.sanitized(),
            sgst: self.sgst.sanitized(),
            cess: self.cess.sanitized(),
        }
    }
}

fn clamp_amount(value: Option<Decimal>) -> Decimal {
    match value {
        Some(amount) if amount > Decimal::ZERO => amount,
        _ => Decimal::ZERO,
    }
}
