//! Records with a nested relation
//!
//! ATMs belong to a branch, licenses and certificates to the bank details.
//! The entity keeps the reference id as the stored column and carries the
//! related row only when a read attached it. DTOs expose only the nested
//! object; on writes nothing but its id is taken.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};

use super::model::{BankDetails, BankDetailsDto, BankDetailsMapper, Branch, BranchDto, BranchMapper};
use crate::crud::postgres::PgQuery;
use crate::crud::{Linked, Mapper, Record, Table};

/// Decode the branch columns a LEFT JOIN aliased with `branch_`.
fn joined_branch(row: &PgRow) -> Result<Option<Branch>, sqlx::Error> {
    let Some(id) = row.try_get::<Option<i64>, _>("branch_ref_id")? else {
        return Ok(None);
    };

    Ok(Some(Branch {
        id: Some(id),
        address: row.try_get("branch_address")?,
        phone_number: row.try_get("branch_phone_number")?,
        city: row.try_get("branch_city")?,
        start_of_work: row.try_get("branch_start_of_work")?,
        end_of_work: row.try_get("branch_end_of_work")?,
    }))
}

/// Decode the bank details columns a LEFT JOIN aliased with `bank_details_`.
fn joined_bank_details(row: &PgRow) -> Result<Option<BankDetails>, sqlx::Error> {
    let Some(id) = row.try_get::<Option<i64>, _>("bank_details_ref_id")? else {
        return Ok(None);
    };

    Ok(Some(BankDetails {
        id: Some(id),
        bik: row.try_get("bank_details_bik")?,
        inn: row.try_get("bank_details_inn")?,
        kpp: row.try_get("bank_details_kpp")?,
        cor_account: row.try_get("bank_details_cor_account")?,
        city: row.try_get("bank_details_city")?,
        joint_stock_company: row.try_get("bank_details_joint_stock_company")?,
        name: row.try_get("bank_details_name")?,
    }))
}

fn bank_details_select(schema: &str, table: &str) -> String {
    format!(
        "SELECT d.*, \
         bd.id AS bank_details_ref_id, bd.bik AS bank_details_bik, bd.inn AS bank_details_inn, \
         bd.kpp AS bank_details_kpp, bd.cor_account AS bank_details_cor_account, \
         bd.city AS bank_details_city, bd.joint_stock_company AS bank_details_joint_stock_company, \
         bd.name AS bank_details_name \
         FROM {schema}.{table} d \
         LEFT JOIN {schema}.bank_details bd ON bd.id = d.bank_details_id"
    )
}

fn bank_details_dto(related: Option<&BankDetails>, id: Option<i64>) -> Option<BankDetailsDto> {
    BankDetailsMapper::to_dto(related).or_else(|| {
        id.map(|id| BankDetailsDto {
            id: Some(id),
            ..BankDetailsDto::default()
        })
    })
}

// =========================================================================
// ATM
// =========================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Atm {
    pub id: Option<i64>,
    pub address: Option<String>,
    pub start_of_work: Option<NaiveTime>,
    pub end_of_work: Option<NaiveTime>,
    pub all_hours: Option<bool>,
    pub branch_id: Option<i64>,
    pub branch: Option<Branch>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtmDto {
    pub id: Option<i64>,
    pub address: Option<String>,
    pub start_of_work: Option<NaiveTime>,
    pub end_of_work: Option<NaiveTime>,
    pub all_hours: Option<bool>,
    pub branch: Option<BranchDto>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AtmMapper;

impl Record for Atm {
    const NAME: &'static str = "atm";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }
}

impl Mapper for AtmMapper {
    type Entity = Atm;
    type Dto = AtmDto;

    fn dto(atm: &Atm) -> AtmDto {
        let branch = BranchMapper::to_dto(atm.branch.as_ref()).or_else(|| {
            atm.branch_id.map(|id| BranchDto {
                id: Some(id),
                ..BranchDto::default()
            })
        });

        AtmDto {
            id: atm.id,
            address: atm.address.clone(),
            start_of_work: atm.start_of_work,
            end_of_work: atm.end_of_work,
            all_hours: atm.all_hours,
            branch,
        }
    }

    fn entity(dto: &AtmDto) -> Atm {
        Atm {
            id: dto.id,
            address: dto.address.clone(),
            start_of_work: dto.start_of_work,
            end_of_work: dto.end_of_work,
            all_hours: dto.all_hours,
            branch_id: dto.branch.as_ref().and_then(|branch| branch.id),
            branch: None,
        }
    }

    fn patch(dto: &AtmDto, target: &mut Atm) {
        if let Some(address) = &dto.address {
            target.address = Some(address.clone());
        }
        if dto.start_of_work.is_some() {
            target.start_of_work = dto.start_of_work;
        }
        if dto.end_of_work.is_some() {
            target.end_of_work = dto.end_of_work;
        }
        if dto.all_hours.is_some() {
            target.all_hours = dto.all_hours;
        }
        // A nested branch without an id cannot be referenced.
        if let Some(id) = dto.branch.as_ref().and_then(|branch| branch.id) {
            if target.branch_id != Some(id) {
                target.branch_id = Some(id);
                target.branch = None;
            }
        }
    }
}

impl Linked for Atm {
    type Target = Branch;

    fn reference(&self) -> Option<i64> {
        self.branch_id
    }

    fn is_attached(&self) -> bool {
        self.branch.is_some()
    }

    fn attach(&mut self, branch: Option<Branch>) {
        self.branch = branch;
    }
}

impl<'r> FromRow<'r, PgRow> for Atm {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            address: row.try_get("address")?,
            start_of_work: row.try_get("start_of_work")?,
            end_of_work: row.try_get("end_of_work")?,
            all_hours: row.try_get("all_hours")?,
            branch_id: row.try_get("branch_id")?,
            branch: joined_branch(row)?,
        })
    }
}

impl Table for Atm {
    const TABLE: &'static str = "atm";
    const COLUMNS: &'static [&'static str] =
        &["address", "start_of_work", "end_of_work", "all_hours", "branch_id"];
    const ID_COLUMN: &'static str = "a.id";

    fn select_sql(schema: &str) -> String {
        format!(
            "SELECT a.*, \
             b.id AS branch_ref_id, b.address AS branch_address, \
             b.phone_number AS branch_phone_number, b.city AS branch_city, \
             b.start_of_work AS branch_start_of_work, b.end_of_work AS branch_end_of_work \
             FROM {schema}.atm a \
             LEFT JOIN {schema}.branch b ON b.id = a.branch_id"
        )
    }

    fn bind_columns<'q>(&self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.address.clone())
            .bind(self.start_of_work)
            .bind(self.end_of_work)
            .bind(self.all_hours)
            .bind(self.branch_id)
    }
}

// =========================================================================
// License and certificate
// =========================================================================

/// A scanned document attached to the bank details.
macro_rules! bank_document {
    (
        $(#[$meta:meta])*
        $entity:ident, $dto:ident, $mapper:ident, $name:literal, $table:literal, $photo:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $entity {
            pub id: Option<i64>,
            pub $photo: Option<Vec<u8>>,
            pub bank_details_id: Option<i64>,
            pub bank_details: Option<BankDetails>,
        }

        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $dto {
            pub id: Option<i64>,
            pub $photo: Option<Vec<u8>>,
            pub bank_details: Option<BankDetailsDto>,
        }

        #[derive(Debug, Clone, Copy, Default)]
        pub struct $mapper;

        impl Record for $entity {
            const NAME: &'static str = $name;

            fn id(&self) -> Option<i64> {
                self.id
            }

            fn set_id(&mut self, id: Option<i64>) {
                self.id = id;
            }
        }

        impl Mapper for $mapper {
            type Entity = $entity;
            type Dto = $dto;

            fn dto(document: &$entity) -> $dto {
                $dto {
                    id: document.id,
                    $photo: document.$photo.clone(),
                    bank_details: bank_details_dto(
                        document.bank_details.as_ref(),
                        document.bank_details_id,
                    ),
                }
            }

            fn entity(dto: &$dto) -> $entity {
                $entity {
                    id: dto.id,
                    $photo: dto.$photo.clone(),
                    bank_details_id: dto.bank_details.as_ref().and_then(|details| details.id),
                    bank_details: None,
                }
            }

            fn patch(dto: &$dto, target: &mut $entity) {
                if let Some(photo) = &dto.$photo {
                    target.$photo = Some(photo.clone());
                }
                if let Some(id) = dto.bank_details.as_ref().and_then(|details| details.id) {
                    if target.bank_details_id != Some(id) {
                        target.bank_details_id = Some(id);
                        target.bank_details = None;
                    }
                }
            }
        }

        impl Linked for $entity {
            type Target = BankDetails;

            fn reference(&self) -> Option<i64> {
                self.bank_details_id
            }

            fn is_attached(&self) -> bool {
                self.bank_details.is_some()
            }

            fn attach(&mut self, details: Option<BankDetails>) {
                self.bank_details = details;
            }
        }

        impl<'r> FromRow<'r, PgRow> for $entity {
            fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
                Ok(Self {
                    id: row.try_get("id")?,
                    $photo: row.try_get(stringify!($photo))?,
                    bank_details_id: row.try_get("bank_details_id")?,
                    bank_details: joined_bank_details(row)?,
                })
            }
        }

        impl Table for $entity {
            const TABLE: &'static str = $table;
            const COLUMNS: &'static [&'static str] = &[stringify!($photo), "bank_details_id"];
            const ID_COLUMN: &'static str = "d.id";

            fn select_sql(schema: &str) -> String {
                bank_details_select(schema, $table)
            }

            fn bind_columns<'q>(&self, query: PgQuery<'q>) -> PgQuery<'q> {
                query.bind(self.$photo.clone()).bind(self.bank_details_id)
            }
        }
    };
}

bank_document!(
    /// Banking license scan.
    License, LicenseDto, LicenseMapper, "license", "license", photo_license
);

bank_document!(
    /// Registration certificate scan.
    Certificate, CertificateDto, CertificateMapper, "certificate", "certificate", photo_certificate
);
