mod common;

use std::fs;

use anyhow::Result;
use common::{expense, income, test_repository, wallet_with};
use fintrack::application::{DataSource, LedgerService};
use fintrack::domain::{TransactionType, YearMonth};
use fintrack::storage::read_wallets;
use rust_decimal_macros::dec;
use uuid::Uuid;

#[test]
fn test_save_and_load_roundtrip() -> Result<()> {
    let (repo, _temp) = test_repository()?;
    let wallets = vec![
        wallet_with(
            "Cash",
            "EUR",
            dec!(120.5),
            vec![
                income("2024-03-01", dec!(2500), "Salary"),
                expense("2024-03-04", dec!(64.25), "Groceries"),
            ],
        )?,
        wallet_with("Savings", "USD", dec!(-10), vec![])?,
    ];

    repo.save(&wallets)?;
    let loaded = repo.load()?.expect("file was just written");

    assert_eq!(loaded, wallets);
    assert_eq!(loaded[0].current_balance(), dec!(2556.25));
    Ok(())
}

#[test]
fn test_roundtrip_keeps_every_digit() -> Result<()> {
    let (repo, temp) = test_repository()?;
    let wallets = vec![wallet_with(
        "Treasury",
        "USD",
        dec!(9876543210987654.321),
        vec![
            income("2024-03-01", dec!(12345678901234.567), "Bond coupon"),
            expense("2024-03-02", dec!(0.10), "Fee"),
        ],
    )?];

    repo.save(&wallets)?;
    let raw = fs::read_to_string(temp.path().join("data.json"))?;
    assert!(raw.contains("12345678901234.567"), "{}", raw);
    assert!(raw.contains("9876543210987654.321"), "{}", raw);

    let loaded = repo.load()?.expect("file was just written");
    let transactions = loaded[0].transactions();
    assert_eq!(loaded[0].initial_balance, dec!(9876543210987654.321));
    assert_eq!(transactions[0].amount, dec!(12345678901234.567));
    assert_eq!(transactions[1].amount.to_string(), "0.10");
    assert_eq!(loaded[0].current_balance(), dec!(9888888889888888.788));
    Ok(())
}

#[test]
fn test_load_missing_file() -> Result<()> {
    let (repo, _temp) = test_repository()?;
    assert!(!repo.path().exists());
    assert!(repo.load()?.is_none());
    Ok(())
}

#[test]
fn test_load_accepts_any_key_case_and_numeric_types() -> Result<()> {
    let wallet_id = Uuid::new_v4();
    let json = format!(
        r#"[
          {{
            "Id": "{}",
            "Name": "Кошелёк",
            "Currency": "RUB",
            "InitialBalance": 10000,
            "Transactions": [
              {{
                "Id": "{}",
                "Date": "2024-05-02T00:00:00",
                "Amount": 1500,
                "Type": 1,
                "Description": "Одежда"
              }},
              {{
                "ID": "{}",
                "DATE": "2024-05-05",
                "AMOUNT": 2000.75,
                "TYPE": "income",
                "DESCRIPTION": "Зарплата"
              }}
            ]
          }}
        ]"#,
        wallet_id,
        Uuid::new_v4(),
        Uuid::new_v4()
    );

    let wallets = read_wallets(json.as_bytes())?;

    assert_eq!(wallets.len(), 1);
    let wallet = &wallets[0];
    assert_eq!(wallet.id, wallet_id);
    assert_eq!(wallet.name, "Кошелёк");
    assert_eq!(wallet.initial_balance, dec!(10000));
    assert_eq!(wallet.transactions()[0].kind, TransactionType::Expense);
    assert_eq!(wallet.transactions()[1].kind, TransactionType::Income);
    assert_eq!(wallet.current_balance(), dec!(10500.75));
    Ok(())
}

#[test]
fn test_loaded_history_is_not_revalidated() -> Result<()> {
    let json = r#"[{
        "id": "3e2a0c8e-5b7f-4b55-9a3e-8f0f4c1d2b3a",
        "name": "Overdrawn",
        "currency": "EUR",
        "initialBalance": 100,
        "transactions": [
            {"id": "c4c9a1f0-1d3b-4f6e-8a2b-9e7d6c5b4a31", "date": "2024-01-10T00:00:00",
             "amount": 250, "type": "Expense", "description": "Legacy"}
        ]
    }]"#;

    let wallets = read_wallets(json.as_bytes())?;
    assert_eq!(wallets[0].current_balance(), dec!(-150));
    Ok(())
}

#[test]
fn test_invalid_documents_are_errors() {
    assert!(read_wallets("not json".as_bytes()).is_err());
    assert!(read_wallets(r#"{"name": "not a list"}"#.as_bytes()).is_err());
    assert!(read_wallets(r#"[{"name": "missing fields"}]"#.as_bytes()).is_err());
}

#[test]
fn test_missing_file_falls_back_to_sample_data() -> Result<()> {
    let (repo, _temp) = test_repository()?;
    let path = repo.path().to_path_buf();
    let month = YearMonth::new(2024, 7).unwrap();

    let service = LedgerService::load_or_generate(repo, month)?;

    assert_eq!(service.origin(), DataSource::Generate);
    assert_eq!(service.wallets().len(), 2);
    assert!(path.is_file());
    assert!(service.monthly_report(month).is_some());
    Ok(())
}

#[test]
fn test_existing_file_is_loaded() -> Result<()> {
    let (repo, temp) = test_repository()?;
    let wallets = vec![wallet_with(
        "Cash",
        "EUR",
        dec!(5),
        vec![income("2024-07-01", dec!(1), "Tip")],
    )?];
    repo.save(&wallets)?;

    let service = LedgerService::load_or_generate(
        fintrack::Repository::new(temp.path().join("data.json")),
        YearMonth::new(2024, 7).unwrap(),
    )?;

    assert_eq!(service.origin(), DataSource::File);
    assert_eq!(service.wallets(), wallets.as_slice());
    Ok(())
}

#[test]
fn test_service_save_persists_new_transactions() -> Result<()> {
    let (repo, temp) = test_repository()?;
    let mut service = LedgerService::open(repo, DataSource::Manual, YearMonth::new(2024, 1).unwrap())?;
    service.create_wallet("Cash".into(), "EUR".into(), dec!(10))?;
    service.record_transaction("Cash", expense("2024-01-02", dec!(4), "Snack"))?;
    service.save()?;

    let raw = fs::read_to_string(temp.path().join("data.json"))?;
    assert!(raw.contains("\"initialBalance\""));
    assert!(raw.contains("\"type\": \"Expense\""));
    assert!(raw.contains("\"date\": \"2024-01-02T00:00:00\""));

    let reloaded = read_wallets(raw.as_bytes())?;
    assert_eq!(reloaded[0].current_balance(), dec!(6));
    Ok(())
}
