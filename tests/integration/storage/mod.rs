mod rocks_wallet_tests;
