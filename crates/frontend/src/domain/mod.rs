pub mod a003_transaction;
