impl Example {
    pub fn fill_defaults(&mut self) {
        self.name = String::from("anonymouse");
        self.lucky_number = -13;
        self.age = 23;
        self.height = 180.500000;
        self.bytes = vec![
            0x31, 0x32, 0x33, 0x34,
        ];
        self.strings = vec![
            String::from("first"),
            String::from("second"),
            String::from("third"),
        ];
        self.ints = vec![
            -1,
            0,
            1,
        ];
        self.uints = vec![
            0,
            1,
            2,
        ];
        self.floats = vec![
            111.111000,
            222.222000,
            333.333000,
        ];
        self.duration = std::time::Duration::from_nanos(70000000000);
        if self.skipped_number == 0 {
            self.skipped_number = 23;
        }
        if self.skipped_string.is_empty() {
            self.skipped_string = String::from("Original");
        }
        if self.skipped_array.is_empty() {
            self.skipped_array = vec![
                9.000000,
                8.000000,
                7.000000,
            ];
        }
        if self.skipped_bytes.is_empty() {
            self.skipped_bytes = vec![
                0x48, 0x65, 0x6c, 0x6c, 0x6f, 0x20, 0x57, 0x6f, 0x72, 0x6c,
                0x64, 0x21, 0x20, 0x48, 0x61, 0x76, 0x65, 0x20, 0x41, 0x20,
                0x47, 0x72, 0x65, 0x61, 0x74, 0x20, 0x44, 0x61, 0x79, 0x20,
                0x3a, 0x3e,
            ];
        }
    }
}
