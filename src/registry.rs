use crate::model::Student;

/// The in-memory student collection plus the sequence counter feeding
/// registration-number generation. One value owned by `main`, handed by
/// reference into every operation.
#[derive(Debug)]
pub struct Registry {
    students: Vec<Student>,
    next_sequence: u32,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Sequence numbers start at 1; the first registration is `-01`.
    pub fn new() -> Self {
        Self {
            students: Vec::new(),
            next_sequence: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Registration number the next successful registration will get:
    /// `<INITIALS><year>-<seq:02>`. Peeks the counter; `register` consumes
    /// it, so a cancelled registration leaves no gap.
    pub fn next_registration(&self, initials: &str, year: i32) -> String {
        format!(
            "{}{}-{:02}",
            initials.trim().to_uppercase(),
            year,
            self.next_sequence
        )
    }

    /// Appends the student and consumes the sequence number. The counter is
    /// never decremented, so deleted students' numbers are not reused.
    pub fn register(&mut self, student: Student) {
        self.students.push(student);
        self.next_sequence += 1;
    }

    /// First student whose name matches, case-insensitive, insertion order.
    pub fn find_by_name(&self, name: &str) -> Option<&Student> {
        self.students
            .iter()
            .find(|s| s.name().eq_ignore_ascii_case(name))
    }

    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut Student> {
        self.students
            .iter_mut()
            .find(|s| s.name().eq_ignore_ascii_case(name))
    }

    pub fn find_by_registration(&self, registration: &str) -> Option<&Student> {
        self.students
            .iter()
            .find(|s| s.registration().eq_ignore_ascii_case(registration))
    }

    /// Duplicate-name check at registration time: exact, case-sensitive.
    pub fn is_name_taken(&self, name: &str) -> bool {
        self.students.iter().any(|s| s.name() == name)
    }

    /// Removes the student with this registration number. Returns false if
    /// no such student exists.
    pub fn remove_by_registration(&mut self, registration: &str) -> bool {
        match self
            .students
            .iter()
            .position(|s| s.registration() == registration)
        {
            Some(idx) => {
                self.students.remove(idx);
                true
            }
            None => false,
        }
    }
}
