//! Flat public-info records

use chrono::NaiveTime;
use rust_decimal::Decimal;

crate::resource! {
    /// A bank branch office and its opening hours.
    entity Branch;
    dto BranchDto;
    mapper BranchMapper;
    name "branch";
    table "branch";
    fields {
        address: String,
        phone_number: i64,
        city: String,
        start_of_work: NaiveTime,
        end_of_work: NaiveTime,
    }
}

crate::resource! {
    /// Registration details of the bank.
    entity BankDetails;
    dto BankDetailsDto;
    mapper BankDetailsMapper;
    name "bank details";
    table "bank_details";
    fields {
        bik: i64,
        inn: i64,
        kpp: i64,
        cor_account: Decimal,
        city: String,
        joint_stock_company: String,
        name: String,
    }
}
