/// Shopping cart summary page with two cart terms, an enrollment events
/// block that must be ignored, and two enrolled schedules.
pub fn course_info_fixture() -> &'static str {
    return r#"
<html>
<body>
<div class="isSSS_ShCtTermWrp">
  <h2>Fall 2024 - Shopping Cart</h2>
  <table>
    <tr>
      <th id="tblCart_Course">Course</th>
      <th id="tblCart_Session">Session</th>
      <th id="tblCart_Instructor">Instructor</th>
      <th id="tblCart_Location">Location</th>
      <th id="tblCart_Time">Time</th>
      <th id="tblCart_Day">Day</th>
    </tr>
    <tr>
      <td headers="tblCart_Course">COMPSCI 50  Introduction to Computer Science</td>
      <td headers="tblCart_Session">Full Term</td>
      <td headers="tblCart_Instructor">David Malan</td>
      <td headers="tblCart_Location">Sanders Theatre</td>
      <td headers="tblCart_Time">11:00am - 11:59am</td>
      <td headers="tblCart_Day">Mon Wed</td>
    </tr>
    <tr class="isSSS_ShCtNonPrim">
      <td headers="tblCart_Course">COMPSCI 50 Section</td>
      <td headers="tblCart_Session">Full Term</td>
      <td headers="tblCart_Instructor">Staff</td>
      <td headers="tblCart_Location">TBA</td>
      <td headers="tblCart_Time">TBA</td>
      <td headers="tblCart_Day">TBA</td>
    </tr>
    <tr>
      <td headers="tblCart_Course">MATH 21A&#160;&#160;Multivariable Calculus</td>
      <td headers="tblCart_Session">Full Term</td>
      <td headers="tblCart_Instructor">Oliver Knill</td>
      <td headers="tblCart_Location">Science Center Hall C</td>
      <td headers="tblCart_Time">9:00am - 10:15am</td>
      <td headers="tblCart_Day">Tue Thu</td>
    </tr>
  </table>
</div>
<div class="isSSS_ShCtTermWrp huSSS_EnrollmentEvents">
  <h2>Enrollment Events - Upcoming</h2>
  <table>
    <tr><th id="tblCart_Course">Event</th></tr>
    <tr><td headers="tblCart_Course">Add/Drop Deadline</td></tr>
  </table>
</div>
<div class="isSSS_ShCtTermWrp">
  <h2>Spring 2025 - Shopping Cart</h2>
  <table>
    <tr><th id="tblCart_Course">Course</th></tr>
    <tr>
      <td headers="tblCart_Course">EC 10B Principles of Economics</td>
      <td headers="tblCart_Session">Full Term</td>
      <td headers="tblCart_Instructor">Jason Furman</td>
      <td headers="tblCart_Location">Science Center Hall B</td>
      <td headers="tblCart_Time">10:30am - 11:45am</td>
      <td headers="tblCart_Day">Tue Thu</td>
    </tr>
    <tr>
      <td headers="tblCart_Session">Full Term</td>
      <td headers="tblCart_Instructor">Nobody</td>
    </tr>
  </table>
</div>
<div class="isSSS_ShCtSchWrp">
  <h2>Fall 2024 - Enrolled</h2>
  <table>
    <tr><th id="tbl_Course">Course</th></tr>
    <tr>
      <td headers="tbl_Course">EXPOS 20 Expository Writing</td>
      <td headers="tbl_Session">Full Term</td>
      <td headers="tbl_Instructor">Staff</td>
      <td headers="tbl_Location">Barker Center 018</td>
      <td headers="tbl_Time">1:30pm - 2:45pm</td>
      <td headers="tbl_Day">Mon Wed</td>
    </tr>
  </table>
</div>
<div class="isSSS_ShCtSchWrp">
  <h2>Spring 2025 - Enrolled</h2>
  <table>
    <tr><th id="tbl_Course">Course</th></tr>
  </table>
</div>
</body>
</html>
"#;
}

/// Academic requirements page carrying the embedded JSON payload.
pub fn requirements_fixture() -> &'static str {
    return r#"
<html>
<body>
<div class="ptprtlcontainer">
{
  "Config": { "Institution": "HRVRD", "Career": "UGRD" },
  "Results": [
    {
      "Description": "Concentration in Computer Science",
      "Status": "IP",
      "Requirements": [
        { "Description": "Basic Software", "Status": "COMP", "Courses": ["COMPSCI 50"] },
        { "Description": "Theory", "Status": "FAIL" }
      ]
    },
    {
      "Description": "General Education",
      "Status": "IP",
      "Requirements": []
    }
  ],
  "Debug": null
}
</div>
</body>
</html>
"#;
}
