// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ReportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Income => "income",
            EntryKind::Expense => "expense",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(EntryKind::Income),
            "expense" => Ok(EntryKind::Expense),
            other => Err(format!("Unknown entry type '{}' (use income|expense)", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Digital,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Digital => "digital",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "digital" => Ok(PaymentMethod::Digital),
            other => Err(format!(
                "Unknown payment method '{}' (use cash|digital)",
                other
            )),
        }
    }
}

/// One stored income or expense event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRecord {
    pub id: i64,
    pub date: NaiveDate,
    pub kind: EntryKind,
    pub amount: Decimal,
    pub description: Option<String>,
    pub item_name: Option<String>,
    pub quantity: Option<Decimal>,
    pub unit_price: Option<Decimal>,
    pub payment_method: PaymentMethod,
    pub recorded_at: NaiveDateTime,
}

impl LedgerRecord {
    /// Shape check applied before a record may contribute to any total.
    pub fn check(&self) -> Result<(), ReportError> {
        if self.amount <= Decimal::ZERO {
            return Err(ReportError::malformed(
                self.id,
                format!("amount must be greater than 0, got {}", self.amount),
            ));
        }
        if let Some(q) = self.quantity.filter(|q| *q <= Decimal::ZERO) {
            return Err(ReportError::malformed(
                self.id,
                format!("quantity must be greater than 0, got {}", q),
            ));
        }
        if let Some(p) = self.unit_price.filter(|p| *p <= Decimal::ZERO) {
            return Err(ReportError::malformed(
                self.id,
                format!("price per unit must be greater than 0, got {}", p),
            ));
        }
        Ok(())
    }
}

/// User-supplied fields for a new or edited entry, before it gets an id.
#[derive(Debug, Clone, Default)]
pub struct NewEntry {
    pub date: Option<NaiveDate>,
    pub kind: Option<EntryKind>,
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub item_name: Option<String>,
    pub quantity: Option<Decimal>,
    pub unit_price: Option<Decimal>,
    pub payment_method: PaymentMethod,
}

impl NewEntry {
    /// Returns every rule the entry breaks; empty means it can be stored.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.date.is_none() {
            errors.push("Date is required".to_string());
        }
        if self.kind.is_none() {
            errors.push("Valid type (income/expense) is required".to_string());
        }
        match self.amount {
            Some(a) if a > Decimal::ZERO => {}
            _ => errors.push("Amount must be greater than 0".to_string()),
        }
        if self.quantity.is_some_and(|q| q <= Decimal::ZERO) {
            errors.push("Quantity must be greater than 0".to_string());
        }
        if self.unit_price.is_some_and(|p| p <= Decimal::ZERO) {
            errors.push("Price per unit must be greater than 0".to_string());
        }
        errors
    }
}
