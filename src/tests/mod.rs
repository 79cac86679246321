mod tailscale_tests;
