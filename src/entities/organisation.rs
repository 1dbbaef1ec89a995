use crate::model::EntityKind;

pub static KIND: EntityKind = EntityKind::collection(
    "Organisations",
    "Organisation",
    "OrganisationID",
    &[
        "APIKey",
        "Name",
        "LegalName",
        "PaysTax",
        "Version",
        "OrganisationType",
        "BaseCurrency",
        "CountryCode",
        "IsDemoCompany",
        "OrganisationStatus",
        "RegistrationNumber",
        "TaxNumber",
        "FinancialYearEndDay",
        "FinancialYearEndMonth",
        "SalesTaxBasis",
        "SalesTaxPeriod",
        "DefaultSalesTax",
        "DefaultPurchasesTax",
        "PeriodLockDate",
        "EndOfYearLockDate",
        "CreatedDateUTC",
        "Timezone",
        "OrganisationEntityType",
        "ShortCode",
        "LineOfBusiness",
        "Addresses",
        "Phones",
        "ExternalLinks",
        "PaymentTerms",
    ],
);

entity! {
    /// The tenant itself; always returned as a single record.
    Organisation => KIND
}

impl Organisation {
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.str("Name")
    }

    #[must_use]
    pub fn base_currency(&self) -> Option<&str> {
        self.str("BaseCurrency")
    }

    #[must_use]
    pub fn short_code(&self) -> Option<&str> {
        self.str("ShortCode")
    }
}
