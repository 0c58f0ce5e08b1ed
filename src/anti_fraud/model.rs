//! Suspicious transfer flags, one table per transfer channel.

crate::resource! {
    /// Fraud verdict on an account-to-account transfer.
    entity SuspiciousAccountTransfer;
    dto SuspiciousAccountTransferDto;
    mapper SuspiciousAccountTransferMapper;
    name "suspicious account transfer";
    table "suspicious_account_transfers";
    fields {
        account_transfer_id: i64,
        is_blocked: bool,
        is_suspicious: bool,
        blocked_reason: String,
        suspicious_reason: String,
    }
}

crate::resource! {
    /// Fraud verdict on a card transfer.
    entity SuspiciousCardTransfer;
    dto SuspiciousCardTransferDto;
    mapper SuspiciousCardTransferMapper;
    name "suspicious card transfer";
    table "suspicious_card_transfer";
    fields {
        card_transfer_id: i64,
        is_blocked: bool,
        is_suspicious: bool,
        blocked_reason: String,
        suspicious_reason: String,
    }
}

crate::resource! {
    /// Fraud verdict on a transfer by phone number.
    entity SuspiciousPhoneTransfer;
    dto SuspiciousPhoneTransferDto;
    mapper SuspiciousPhoneTransferMapper;
    name "suspicious phone transfer";
    table "suspicious_phone_transfers";
    fields {
        phone_transfer_id: i64,
        is_blocked: bool,
        is_suspicious: bool,
        blocked_reason: String,
        suspicious_reason: String,
    }
}
