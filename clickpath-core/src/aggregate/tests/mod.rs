mod frequency_tests;
