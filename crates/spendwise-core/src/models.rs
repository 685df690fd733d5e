//! Domain models for Spendwise

use serde::{Deserialize, Serialize};

/// One of the 14 user-supplied fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    Income,
    Age,
    Dependents,
    Rent,
    LoanRepayment,
    Insurance,
    Groceries,
    Transport,
    EatingOut,
    Entertainment,
    Utilities,
    Healthcare,
    Education,
    Miscellaneous,
}

impl InputField {
    /// Column name used by forms, CSV headers and the preprocessor schema
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Age => "Age",
            Self::Dependents => "Dependents",
            Self::Rent => "Rent",
            Self::LoanRepayment => "Loan_Repayment",
            Self::Insurance => "Insurance",
            Self::Groceries => "Groceries",
            Self::Transport => "Transport",
            Self::EatingOut => "Eating_Out",
            Self::Entertainment => "Entertainment",
            Self::Utilities => "Utilities",
            Self::Healthcare => "Healthcare",
            Self::Education => "Education",
            Self::Miscellaneous => "Miscellaneous",
        }
    }

    /// Human-readable label ("Loan Repayment")
    pub fn label(&self) -> &'static str {
        match self {
            Self::LoanRepayment => "Loan Repayment",
            Self::EatingOut => "Eating Out",
            other => other.as_str(),
        }
    }

    /// All fields in form order
    pub fn all() -> &'static [InputField] {
        &[
            Self::Income,
            Self::Age,
            Self::Dependents,
            Self::Rent,
            Self::LoanRepayment,
            Self::Insurance,
            Self::Groceries,
            Self::Transport,
            Self::EatingOut,
            Self::Entertainment,
            Self::Utilities,
            Self::Healthcare,
            Self::Education,
            Self::Miscellaneous,
        ]
    }

    /// The 11 expense categories (Rent through Miscellaneous)
    pub fn expenses() -> &'static [InputField] {
        &Self::all()[3..]
    }

    /// Look up a field by its column name (exact match)
    pub fn from_column(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|f| f.as_str() == name)
    }
}

impl std::fmt::Display for InputField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A field computed from the raw input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DerivedField {
    TotalExpense,
    DisposableIncome,
    DesiredSavings,
    DesiredSavingsPercentage,
}

impl DerivedField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TotalExpense => "Total_Expense",
            Self::DisposableIncome => "Disposable_Income",
            Self::DesiredSavings => "Desired_Savings",
            Self::DesiredSavingsPercentage => "Desired_Savings_Percentage",
        }
    }

    pub fn all() -> &'static [DerivedField] {
        &[
            Self::TotalExpense,
            Self::DisposableIncome,
            Self::DesiredSavings,
            Self::DesiredSavingsPercentage,
        ]
    }

    pub fn from_column(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|f| f.as_str() == name)
    }
}

/// Monthly household figures as submitted by the user
///
/// Every value is a non-negative whole number. Missing fields default to 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawFinancialInput {
    #[serde(rename = "Income")]
    pub income: u64,
    #[serde(rename = "Age")]
    pub age: u64,
    #[serde(rename = "Dependents")]
    pub dependents: u64,
    #[serde(rename = "Rent")]
    pub rent: u64,
    #[serde(rename = "Loan_Repayment")]
    pub loan_repayment: u64,
    #[serde(rename = "Insurance")]
    pub insurance: u64,
    #[serde(rename = "Groceries")]
    pub groceries: u64,
    #[serde(rename = "Transport")]
    pub transport: u64,
    #[serde(rename = "Eating_Out")]
    pub eating_out: u64,
    #[serde(rename = "Entertainment")]
    pub entertainment: u64,
    #[serde(rename = "Utilities")]
    pub utilities: u64,
    #[serde(rename = "Healthcare")]
    pub healthcare: u64,
    #[serde(rename = "Education")]
    pub education: u64,
    #[serde(rename = "Miscellaneous")]
    pub miscellaneous: u64,
}

impl RawFinancialInput {
    pub fn get(&self, field: InputField) -> u64 {
        match field {
            InputField::Income => self.income,
            InputField::Age => self.age,
            InputField::Dependents => self.dependents,
            InputField::Rent => self.rent,
            InputField::LoanRepayment => self.loan_repayment,
            InputField::Insurance => self.insurance,
            InputField::Groceries => self.groceries,
            InputField::Transport => self.transport,
            InputField::EatingOut => self.eating_out,
            InputField::Entertainment => self.entertainment,
            InputField::Utilities => self.utilities,
            InputField::Healthcare => self.healthcare,
            InputField::Education => self.education,
            InputField::Miscellaneous => self.miscellaneous,
        }
    }

    pub fn set(&mut self, field: InputField, value: u64) {
        let slot = match field {
            InputField::Income => &mut self.income,
            InputField::Age => &mut self.age,
            InputField::Dependents => &mut self.dependents,
            InputField::Rent => &mut self.rent,
            InputField::LoanRepayment => &mut self.loan_repayment,
            InputField::Insurance => &mut self.insurance,
            InputField::Groceries => &mut self.groceries,
            InputField::Transport => &mut self.transport,
            InputField::EatingOut => &mut self.eating_out,
            InputField::Entertainment => &mut self.entertainment,
            InputField::Utilities => &mut self.utilities,
            InputField::Healthcare => &mut self.healthcare,
            InputField::Education => &mut self.education,
            InputField::Miscellaneous => &mut self.miscellaneous,
        };
        *slot = value;
    }

    /// Builder-style setter, handy in tests and the CLI
    pub fn with(mut self, field: InputField, value: u64) -> Self {
        self.set(field, value);
        self
    }

    /// (field, amount) pairs for the 11 expense categories
    pub fn expenses(&self) -> impl Iterator<Item = (InputField, u64)> + '_ {
        InputField::expenses().iter().map(move |f| (*f, self.get(*f)))
    }
}

/// Statistics computed from a [`RawFinancialInput`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    #[serde(rename = "Total_Expense")]
    pub total_expense: f64,
    /// Income minus total expense; negative when expenses exceed income
    #[serde(rename = "Disposable_Income")]
    pub disposable_income: f64,
    /// Savings target, not an actual balance
    #[serde(rename = "Desired_Savings")]
    pub desired_savings: f64,
    #[serde(rename = "Desired_Savings_Percentage")]
    pub desired_savings_percentage: f64,
}

impl DerivedMetrics {
    pub fn get(&self, field: DerivedField) -> f64 {
        match field {
            DerivedField::TotalExpense => self.total_expense,
            DerivedField::DisposableIncome => self.disposable_income,
            DerivedField::DesiredSavings => self.desired_savings,
            DerivedField::DesiredSavingsPercentage => self.desired_savings_percentage,
        }
    }
}

/// Spending-behavior category predicted by a classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    HeavySpender = 0,
    ModerateSpender = 1,
    Saver = 2,
}

impl Category {
    /// Number of classes every classifier must produce
    pub const COUNT: usize = 3;

    pub fn all() -> &'static [Category] {
        &[Self::HeavySpender, Self::ModerateSpender, Self::Saver]
    }

    /// Map a class index (model output) to a category
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::HeavySpender),
            1 => Some(Self::ModerateSpender),
            2 => Some(Self::Saver),
            _ => None,
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HeavySpender => "heavy_spender",
            Self::ModerateSpender => "moderate_spender",
            Self::Saver => "saver",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::HeavySpender => "Heavy Spender",
            Self::ModerateSpender => "Moderate Spender",
            Self::Saver => "Saver",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::HeavySpender => "💸",
            Self::ModerateSpender => "💼",
            Self::Saver => "💰",
        }
    }

    /// Label with its emoji ("💰 Saver")
    pub fn display_label(&self) -> String {
        format!("{} {}", self.emoji(), self.label())
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Named, ordered values ready for the preprocessor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRecord {
    names: Vec<String>,
    values: Vec<f64>,
}

impl FeatureRecord {
    pub(crate) fn new(names: Vec<String>, values: Vec<f64>) -> Self {
        debug_assert_eq!(names.len(), values.len());
        Self { names, values }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Value of a named column, if present
    pub fn get(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.values[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// Numeric vector produced by the preprocessor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_order_and_expenses() {
        assert_eq!(InputField::all().len(), 14);
        assert_eq!(InputField::expenses().len(), 11);
        assert_eq!(InputField::expenses()[0], InputField::Rent);
        assert_eq!(InputField::expenses()[10], InputField::Miscellaneous);
        assert!(!InputField::expenses().contains(&InputField::Age));
    }

    #[test]
    fn test_from_column_is_exact() {
        assert_eq!(
            InputField::from_column("Loan_Repayment"),
            Some(InputField::LoanRepayment)
        );
        assert_eq!(InputField::from_column("loan_repayment"), None);
        assert_eq!(
            DerivedField::from_column("Desired_Savings"),
            Some(DerivedField::DesiredSavings)
        );
        assert_eq!(DerivedField::from_column("Savings"), None);
    }

    #[test]
    fn test_get_set_roundtrip_every_field() {
        let mut input = RawFinancialInput::default();
        for (i, field) in InputField::all().iter().enumerate() {
            input.set(*field, (i as u64 + 1) * 100);
        }
        for (i, field) in InputField::all().iter().enumerate() {
            assert_eq!(input.get(*field), (i as u64 + 1) * 100, "{}", field);
        }
    }

    #[test]
    fn test_input_json_uses_column_names_and_defaults() {
        let input: RawFinancialInput =
            serde_json::from_str(r#"{"Income": 50000, "Eating_Out": 2000}"#).unwrap();
        assert_eq!(input.income, 50000);
        assert_eq!(input.eating_out, 2000);
        assert_eq!(input.rent, 0);

        let json = serde_json::to_value(input).unwrap();
        assert_eq!(json["Loan_Repayment"], 0);
    }

    #[test]
    fn test_category_index_mapping() {
        for category in Category::all() {
            assert_eq!(Category::from_index(category.index()), Some(*category));
        }
        assert_eq!(Category::from_index(3), None);
        assert_eq!(Category::HeavySpender.index(), 0);
        assert_eq!(Category::Saver.index(), 2);
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::ModerateSpender.to_string(), "moderate_spender");
        assert_eq!(Category::Saver.display_label(), "💰 Saver");
    }

    #[test]
    fn test_feature_record_lookup() {
        let record = FeatureRecord::new(
            vec!["Income".to_string(), "Age".to_string()],
            vec![1000.0, 30.0],
        );
        assert_eq!(record.get("Age"), Some(30.0));
        assert_eq!(record.get("Rent"), None);
        assert_eq!(record.len(), 2);
    }
}
