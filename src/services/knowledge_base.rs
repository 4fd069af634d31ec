// src/services/knowledge_base.rs

pub const KNOWLEDGE_BASE: &str = r#"
# Data Recovery Expert Knowledge Base

## Initial Assessment
- Stop using the device immediately when data loss occurs
- Never attempt DIY recovery on critical data
- Keep device in stable environment (room temperature, low humidity)
- Document when and how the data loss occurred

## Common Problems and Solutions

### Hard Drive Issues
1. Clicking Sounds
   - Indicates potential head crash or platter damage
   - Professional clean room recovery required
   - Success rate: 50-70%
   - Estimated cost: $500-$1500

2. Drive Not Recognized
   - Could be controller board failure
   - May require firmware repair
   - Success rate: 70-90%
   - Estimated cost: $300-$900

3. Drive Spins But No Access
   - Possible logical failure or bad sectors
   - Professional recovery recommended
   - Success rate: 80-95%
   - Estimated cost: $400-$1200

### SSD Issues
1. Sudden Failure
   - Often due to controller failure
   - Requires specialized equipment
   - Success rate: 60-85%
   - Estimated cost: $600-$1800

2. Firmware Issues
   - Common in certain SSD brands
   - Professional firmware repair needed
   - Success rate: 70-90%
   - Estimated cost: $400-$1200

## Service Levels
1. Standard Service
   - 5-7 business days
   - Full diagnostic report
   - Regular updates
   - Most cost-effective

2. Express Service
   - 2-3 business days
   - Priority handling
   - 24/7 status updates
   - 30-50% premium over standard

3. Emergency Service
   - 24-48 hours
   - Immediate attention
   - Direct engineer contact
   - 100% premium over standard

## Quality Assurance
- ISO Certified Clean Room
- Chain of custody documentation
- Secure facility with 24/7 monitoring
- Non-disclosure agreement available
- Data verification after recovery

## When to Choose Local vs. National Service
1. Choose Local When:
   - In-person consultation needed
   - Same-day drop-off required
   - Budget is primary concern
   - Device is too large to ship

2. Choose National When:
   - Local options limited
   - Higher success rate needed
   - Specialized recovery required
   - Better equipment/facilities needed

## Data Protection Tips
1. Regular Backups
   - Use 3-2-1 backup strategy
   - Test backups regularly
   - Store offsite copy

2. Early Warning Signs
   - Unusual noises
   - Slow performance
   - Frequent crashes
   - File system errors

## Company Selection Criteria
1. Technical Capabilities
   - Clean room certification
   - Success rate history
   - Equipment quality
   - Staff expertise

2. Service Quality
   - Communication clarity
   - Transparent pricing
   - Customer reviews
   - Support availability

3. Security Measures
   - Facility security
   - Data handling procedures
   - Privacy guarantees
   - Certification compliance
"#;

pub fn system_prompt() -> String {
    format!(
        "You are a helpful data recovery expert. Use the following knowledge base to answer questions. \
If the question isn't covered in the knowledge base, provide general best practices and recommend \
contacting a professional. Always be professional and concise.\n\n{}",
        KNOWLEDGE_BASE
    )
}
