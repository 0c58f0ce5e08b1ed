use rust_decimal::Decimal;

crate::resource! {
    /// A customer's bank account and its balance.
    entity AccountDetails;
    dto AccountDetailsDto;
    mapper AccountDetailsMapper;
    name "account details";
    table "account_details";
    fields {
        passport_id: i64,
        account_number: i64,
        bank_details_id: i64,
        money: Decimal,
        negative_balance: bool,
        profile_id: i64,
    }
}
