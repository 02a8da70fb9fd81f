// file: src/extractor/sample.rs
// description: sample passage covering every entity kind

pub const SAMPLE_TEXT: &str = "
Contact Sarah Johnson at sarah.johnson@techcorp.com or call (555) 123-4567.
Meeting scheduled for 2024-03-15 at 2:30 PM EST. Invoice #INV-2024-001
for $1,250.75 is due. Alternative contact: Mike Davis at +1-800-555-0199 or
mike.davis@company.org. Visit our website at https://www.techcorp.com
or ftp://files.techcorp.com/docs. Reference ticket #TK-9876 and
order #ORD-ABC-123. Payment via credit card 4532-1234-5678-9012
or wire transfer to account 987-654-3210. Social Security Number
123-45-6789 on file. IP address 192.168.1.100, and 192.168.1.1 flagged.
Additional phone numbers: 555.987.6543, (+44)7912991234 and (800)CALL-NOW.
Sub-totals: £3,000.80 and $2,100. Website: http://techcorp.com.
Today's date is 06/06/2025.
";
