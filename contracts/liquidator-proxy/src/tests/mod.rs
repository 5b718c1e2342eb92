pub mod mock_ledger;
